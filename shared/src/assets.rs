use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("failed to load image {image_id}: {reason}")]
    LoadFailed { image_id: String, reason: String },
    #[error("image preload was abandoned before it settled")]
    Abandoned,
}

/// A native image that may still be decoding.
pub trait AssetHandle {
    fn is_loaded(&self) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Readiness {
    Loading { loaded: usize, total: usize },
    Ready,
    Failed(AssetError),
}

/// Settles once with the aggregate outcome of the palette preload.
#[derive(Debug)]
pub struct ImagesReady(oneshot::Receiver<Result<(), AssetError>>);

impl Future for ImagesReady {
    type Output = Result<(), AssetError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or(Err(AssetError::Abandoned)))
    }
}

/// Registry of palette images plus the one-shot "all images ready" signal.
///
/// The signal resolves once every expected image loaded and rejects on the
/// first failure. After that it never changes, but images that load later
/// still become usable individually.
pub struct AssetGate<H> {
    assets: HashMap<String, H>,
    pending: HashSet<String>,
    total: usize,
    outcome: Option<Result<(), AssetError>>,
    signal: Option<oneshot::Sender<Result<(), AssetError>>>,
    ready: Option<ImagesReady>,
}

impl<H: AssetHandle> AssetGate<H> {
    pub fn new<I, S>(image_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pending: HashSet<String> = image_ids.into_iter().map(Into::into).collect();
        let (sender, receiver) = oneshot::channel();
        let mut gate = Self {
            assets: HashMap::new(),
            total: pending.len(),
            pending,
            outcome: None,
            signal: Some(sender),
            ready: Some(ImagesReady(receiver)),
        };
        if gate.total == 0 {
            log::debug!("No palette images to preload");
            gate.settle(Ok(()));
        }
        gate
    }

    /// Hands out the readiness signal. Only the first caller gets it.
    pub fn take_ready(&mut self) -> Option<ImagesReady> {
        self.ready.take()
    }

    pub fn loaded(&mut self, image_id: &str, handle: H) {
        self.pending.remove(image_id);
        self.assets.insert(image_id.to_string(), handle);
        log::debug!("Palette image loaded: {image_id}");
        if self.pending.is_empty() {
            self.settle(Ok(()));
        }
    }

    pub fn failed(&mut self, image_id: &str, reason: impl Into<String>) {
        let error = AssetError::LoadFailed {
            image_id: image_id.to_string(),
            reason: reason.into(),
        };
        self.pending.remove(image_id);
        log::error!("{error}");
        self.settle(Err(error));
    }

    fn settle(&mut self, outcome: Result<(), AssetError>) {
        if self.outcome.is_some() {
            return;
        }
        if let Some(signal) = self.signal.take() {
            // Nobody listening is fine; the outcome is still recorded.
            let _ = signal.send(outcome.clone());
        }
        self.outcome = Some(outcome);
    }

    /// Image usable for drawing right now, if any.
    pub fn get(&self, image_id: &str) -> Option<&H> {
        self.assets
            .get(image_id)
            .filter(|handle| handle.is_loaded())
    }

    pub fn is_available(&self, image_id: &str) -> bool {
        self.get(image_id).is_some()
    }

    pub fn readiness(&self) -> Readiness {
        match &self.outcome {
            Some(Ok(())) => Readiness::Ready,
            Some(Err(error)) => Readiness::Failed(error.clone()),
            None => Readiness::Loading {
                loaded: self.assets.len(),
                total: self.total,
            },
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
