use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlCanvasElement};

use sitesketch_shared::{Mode, Point, Size};

use crate::error::InitError;
use crate::render::redraw;
use crate::state::State;

/// Checks one surface handed over by the embedding page.
pub fn surface<T: JsCast>(element: Option<Element>, name: &str) -> Result<T, InitError> {
    let element = element.ok_or_else(|| InitError::MissingSurface(name.to_string()))?;
    element
        .dyn_into::<T>()
        .map_err(|_| InitError::MissingSurface(format!("{name} (wrong element type)")))
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn set_canvas_mode(canvas: &HtmlCanvasElement, mode: Mode) {
    let cursor = match mode {
        Mode::Drawing => "crosshair",
        Mode::Moving | Mode::Rotating => "move",
        Mode::Erasing => "cell",
    };
    let _ = canvas.style().set_property("cursor", cursor);
}

pub fn set_status(status: &Element, state: &str, text: &str) {
    let _ = status.set_attribute("data-state", state);
    status.set_text_content(Some(text));
}

pub fn set_image_class(image: &Element, class: &str) {
    let classes = image.class_list();
    let _ = classes.remove_3("loading", "loaded", "error");
    let _ = classes.add_1(class);
}

/// Pins the canvas to its logical resolution, rescaling the diagram when the
/// previous pixel size was a different, non-zero one.
pub fn resize_canvas(state: &mut State) {
    let previous = Size::new(state.canvas.width() as f64, state.canvas.height() as f64);
    let target = state.sketch.config().canvas_size();
    state.canvas.set_width(target.width as u32);
    state.canvas.set_height(target.height as u32);
    if state.sketch.rescale_from(previous) {
        log::info!(
            "Canvas resized from {}x{}, diagram rescaled",
            previous.width,
            previous.height
        );
    }
    redraw(state);
}

/// Client coordinates relative to the canvas box, plus that box's size.
pub fn client_to_canvas(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (Point, Size) {
    let rect = canvas.get_bounding_client_rect();
    (
        Point::new(client_x - rect.left(), client_y - rect.top()),
        Size::new(rect.width(), rect.height()),
    )
}
