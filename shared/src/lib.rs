use serde::{Deserialize, Serialize};

mod assets;
mod codec;
mod config;
mod diagram;
mod element;
mod geometry;
mod gesture;
mod render;
mod sketch;

pub use assets::{AssetError, AssetGate, AssetHandle, ImagesReady, Readiness};
pub use codec::{decode_diagram, encode_diagram, DiagramError};
pub use config::{ConfigError, EditorConfig};
pub use diagram::Diagram;
pub use element::{DrawingElement, ElementId, Figure, IdGenerator, Line};
pub use geometry::{angle_between, erase_at, locate_figure, rescale, scale_factors, wrap_angle};
pub use gesture::{Gesture, GestureSession, Mode, Pen, PointerInput, PointerPhase, Tool};
pub use render::{render, Surface};
pub use sketch::{hydrate, DropError, RestoreError, Sketch};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Drops samples that would poison the geometry (NaN or infinite).
    pub fn normalize(self) -> Option<Self> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        Some(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Strict containment, the edges themselves count as outside.
    pub fn contains_strict(&self, point: Point) -> bool {
        point.x > 0.0 && point.x < self.width && point.y > 0.0 && point.y < self.height
    }
}
