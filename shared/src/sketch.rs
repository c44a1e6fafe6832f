use thiserror::Error;

use crate::assets::{AssetError, AssetGate, AssetHandle, ImagesReady};
use crate::codec::{decode_diagram, encode_diagram, DiagramError};
use crate::config::EditorConfig;
use crate::diagram::Diagram;
use crate::element::{DrawingElement, ElementId, Figure, IdGenerator};
use crate::geometry::{erase_at, rescale, scale_factors};
use crate::gesture::{GestureSession, Mode, Pen, PointerInput, PointerPhase, Tool};
use crate::{Point, Size};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DropError {
    #[error("drop point lies outside the canvas")]
    OutsideCanvas,
    #[error("image {0} is not loaded yet")]
    AssetNotLoaded(String),
}

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("palette images did not load: {0}")]
    Images(#[from] AssetError),
    #[error(transparent)]
    Diagram(#[from] DiagramError),
}

/// Waits for the palette preload and only then runs `restore`. A failed
/// preload never reaches `restore`, so the canvas keeps what it has.
pub async fn hydrate<F>(ready: ImagesReady, restore: F) -> Result<usize, RestoreError>
where
    F: FnOnce() -> Result<usize, DiagramError>,
{
    ready.await?;
    Ok(restore()?)
}

/// The editor model: the diagram plus everything that mutates it.
pub struct Sketch {
    config: EditorConfig,
    diagram: Diagram,
    session: GestureSession,
    ids: IdGenerator,
    pen: Pen,
    /// Palette image being dragged towards the canvas.
    palette_drag: Option<String>,
}

impl Sketch {
    pub fn new(config: EditorConfig, id_seed: u64) -> Self {
        let session = GestureSession::new(config.double_press_ms, config.eraser_radius);
        let pen = Pen {
            color: config.default_color.clone(),
            width: config.pen_width,
        };
        Self {
            config,
            diagram: Diagram::new(),
            session,
            ids: IdGenerator::new(id_seed),
            pen,
            palette_drag: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn elements(&self) -> &[DrawingElement] {
        self.diagram.elements()
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn tool(&self) -> Tool {
        self.session.tool()
    }

    pub fn color(&self) -> &str {
        &self.pen.color
    }

    /// Picking a color always goes back to drawing.
    pub fn select_color(&mut self, color: &str) {
        self.pen.color = color.to_string();
        self.session.force_tool(Tool::Draw);
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.session.force_tool(tool);
    }

    pub fn handle_input(&mut self, input: PointerInput) -> bool {
        self.session
            .handle(&mut self.diagram, &mut self.ids, &self.pen, input)
    }

    /// A palette drag interrupts whatever was going on and drops the eraser.
    pub fn begin_palette_drag(&mut self, image_id: &str) {
        self.session.force_tool(Tool::Draw);
        self.palette_drag = Some(image_id.to_string());
    }

    pub fn palette_drag(&self) -> Option<&str> {
        self.palette_drag.as_deref()
    }

    pub fn cancel_palette_drag(&mut self) -> Option<String> {
        self.palette_drag.take()
    }

    /// Drops the dragged palette image at `point`. `None` when no palette
    /// drag is running.
    pub fn finish_palette_drag<H: AssetHandle>(
        &mut self,
        assets: &AssetGate<H>,
        point: Point,
        bounds: Size,
    ) -> Option<Result<ElementId, DropError>> {
        let image_id = self.palette_drag.take()?;
        Some(self.drop_figure(assets, &image_id, point, bounds))
    }

    /// A touch contact lifted (`Release`) or was taken away (`Cancel`).
    /// Both leave no palette drag and no running gesture behind; only a
    /// lifted palette drag with a drop position places its image.
    pub fn end_touch<H: AssetHandle>(
        &mut self,
        assets: &AssetGate<H>,
        phase: PointerPhase,
        drop_at: Option<(Point, Size)>,
    ) -> Option<Result<ElementId, DropError>> {
        let dropped = match (phase, drop_at) {
            (PointerPhase::Release, Some((point, bounds))) => {
                self.finish_palette_drag(assets, point, bounds)
            }
            _ => {
                if let Some(image_id) = self.cancel_palette_drag() {
                    log::debug!("Palette drag of {image_id} ended without a drop");
                }
                None
            }
        };
        self.session.reset();
        dropped
    }

    pub fn end_gesture(&mut self) {
        self.session.reset();
    }

    /// Erases outside any pointer gesture; a running gesture ends, since the
    /// element it targets may shift down.
    pub fn erase_at(&mut self, point: Point) -> bool {
        self.session.reset();
        erase_at(&mut self.diagram, point, self.config.eraser_radius)
    }

    pub fn insert_figure(&mut self, image_id: &str, origin: Point, size: Size) -> ElementId {
        let id = self.ids.next_figure();
        self.diagram.push(DrawingElement::Figure(Figure::new(
            id.clone(),
            image_id,
            origin,
            size,
        )));
        id
    }

    /// Places a palette image centred on `point` (canvas coordinates). The
    /// drop is refused outside `bounds` or while the image is still loading.
    pub fn drop_figure<H: AssetHandle>(
        &mut self,
        assets: &AssetGate<H>,
        image_id: &str,
        point: Point,
        bounds: Size,
    ) -> Result<ElementId, DropError> {
        let point = point.normalize().ok_or(DropError::OutsideCanvas)?;
        if !bounds.contains_strict(point) {
            return Err(DropError::OutsideCanvas);
        }
        if !assets.is_available(image_id) {
            return Err(DropError::AssetNotLoaded(image_id.to_string()));
        }
        let size = self.config.figure_extent();
        let origin = Point::new(point.x - size.width / 2.0, point.y - size.height / 2.0);
        let id = self.insert_figure(image_id, origin, size);
        log::info!("Placed figure {id} ({image_id}) at {:.0},{:.0}", origin.x, origin.y);
        Ok(id)
    }

    pub fn clear(&mut self) {
        self.diagram.clear();
        self.session.force_tool(Tool::Draw);
    }

    pub fn serialize(&self) -> Result<String, DiagramError> {
        encode_diagram(&self.diagram)
    }

    /// Replaces the diagram with a saved one. On error nothing changes.
    pub fn load(&mut self, payload: &str) -> Result<usize, DiagramError> {
        let mut elements = decode_diagram(payload)?;
        for element in &mut elements {
            if element.id().is_empty() {
                let fresh = match element {
                    DrawingElement::Line(_) => self.ids.next_line(),
                    DrawingElement::Figure(_) => self.ids.next_figure(),
                };
                *element.id_mut() = fresh;
            }
        }
        let count = elements.len();
        self.diagram.replace(elements);
        // Whatever the running gesture pointed at may be gone now.
        self.session.reset();
        log::info!("Loaded diagram with {count} elements");
        Ok(count)
    }

    /// Rescales geometry after the canvas went from `previous` to the fixed
    /// target size. Returns whether anything was scaled.
    pub fn rescale_from(&mut self, previous: Size) -> bool {
        let target = self.config.canvas_size();
        match scale_factors(previous, target) {
            Some((scale_x, scale_y)) => {
                log::debug!(
                    "Rescaling diagram {}x{} -> {}x{}",
                    previous.width,
                    previous.height,
                    target.width,
                    target.height
                );
                rescale(&mut self.diagram, scale_x, scale_y);
                true
            }
            None => false,
        }
    }
}
