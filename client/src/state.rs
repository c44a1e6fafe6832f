use web_sys::{
    CanvasRenderingContext2d, Element, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlImageElement,
};

use sitesketch_shared::{AssetGate, AssetHandle, Mode, Sketch};

/// A palette `<img>` as seen by the renderer.
#[derive(Clone)]
pub struct PaletteImage(pub HtmlImageElement);

impl AssetHandle for PaletteImage {
    fn is_loaded(&self) -> bool {
        self.0.complete() && self.0.natural_width() > 0
    }
}

/// The toolbar elements the editor drives.
pub struct Controls {
    pub colors: Vec<HtmlButtonElement>,
    pub eraser: HtmlButtonElement,
    pub draw: HtmlButtonElement,
    pub status: Element,
}

/// Translucent copy of a palette image following a finger.
pub struct TouchGhost {
    pub element: HtmlElement,
    pub offset_x: f64,
    pub offset_y: f64,
}

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub controls: Controls,
    pub sketch: Sketch,
    pub assets: AssetGate<PaletteImage>,
    pub ghost: Option<TouchGhost>,
}

impl State {
    pub fn mode(&self) -> Mode {
        self.sketch.mode()
    }
}
