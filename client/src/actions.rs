use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement, Touch};

use sitesketch_shared::{DropError, ElementId, PointerInput, PointerPhase, Tool};

use crate::dom::{client_to_canvas, set_canvas_mode, set_tool_button};
use crate::render::redraw;
use crate::state::{State, TouchGhost};

pub fn sync_tool_ui(state: &State) {
    let tool = state.sketch.tool();
    set_tool_button(&state.controls.draw, tool == Tool::Draw);
    set_tool_button(&state.controls.eraser, tool == Tool::Erase);
    let color = state.sketch.color();
    for button in &state.controls.colors {
        set_tool_button(button, button.id() == color);
    }
    set_canvas_mode(&state.canvas, state.mode());
}

pub fn apply_input(state: &mut State, input: PointerInput) {
    let before = state.mode();
    if state.sketch.handle_input(input) {
        redraw(state);
    }
    if state.mode() != before {
        set_canvas_mode(&state.canvas, state.mode());
    }
}

pub fn select_color(state: &mut State, color: &str) {
    if color.is_empty() {
        return;
    }
    state.sketch.select_color(color);
    log::debug!("Color {color}");
    sync_tool_ui(state);
}

pub fn select_tool(state: &mut State, tool: Tool) {
    state.sketch.select_tool(tool);
    sync_tool_ui(state);
}

pub fn clear_board(state: &mut State) {
    state.sketch.clear();
    redraw(state);
    sync_tool_ui(state);
}

/// Replaces the diagram; a rejected payload leaves everything as it was.
pub fn load_diagram(state: &mut State, payload: &str) -> bool {
    match state.sketch.load(payload) {
        Ok(_) => {
            redraw(state);
            sync_tool_ui(state);
            true
        }
        Err(err) => {
            log::error!("Rejected diagram payload: {err}");
            false
        }
    }
}

pub fn begin_palette_drag(state: &mut State, image_id: &str) {
    log::debug!("Dragging {image_id}");
    state.sketch.begin_palette_drag(image_id);
    sync_tool_ui(state);
}

fn report_drop(state: &State, dropped: Option<Result<ElementId, DropError>>) {
    match dropped {
        Some(Ok(_)) => redraw(state),
        Some(Err(err)) => log::warn!("Could not drop palette image: {err}"),
        None => {}
    }
}

/// Places the dragged palette image at a viewport position over the canvas.
pub fn drop_palette_image(state: &mut State, client_x: f64, client_y: f64) {
    let (point, bounds) = client_to_canvas(&state.canvas, client_x, client_y);
    let dropped = state
        .sketch
        .finish_palette_drag(&state.assets, point, bounds);
    if dropped.is_none() {
        log::warn!("Drop without a palette image");
    }
    report_drop(state, dropped);
}

/// A mouse drag that ended anywhere but on the canvas.
pub fn abandon_palette_drag(state: &mut State) {
    if let Some(image_id) = state.sketch.cancel_palette_drag() {
        log::debug!("Drag of {image_id} abandoned");
    }
}

fn place_ghost(ghost: &TouchGhost, touch: &Touch) {
    let style = ghost.element.style();
    let _ = style.set_property("left", &format!("{}px", touch.page_x() as f64 - ghost.offset_x));
    let _ = style.set_property("top", &format!("{}px", touch.page_y() as f64 - ghost.offset_y));
}

pub fn start_touch_drag(
    state: &mut State,
    document: &Document,
    image: &HtmlImageElement,
    touch: &Touch,
) {
    remove_ghost(state);
    let rect = image.get_bounding_client_rect();
    let Some(element) = image
        .clone_node_with_deep(true)
        .ok()
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let size = format!("{}px", state.sketch.config().figure_size);
    let style = element.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("opacity", "0.7");
    let _ = style.set_property("pointer-events", "none");
    let _ = style.set_property("width", &size);
    let _ = style.set_property("height", &size);
    let _ = style.set_property("z-index", "9999");
    let _ = element.remove_attribute("id");
    let ghost = TouchGhost {
        element,
        offset_x: touch.client_x() as f64 - rect.left(),
        offset_y: touch.client_y() as f64 - rect.top(),
    };
    place_ghost(&ghost, touch);
    if let Some(body) = document.body() {
        let _ = body.append_child(&ghost.element);
    }
    state.ghost = Some(ghost);
    begin_palette_drag(state, &image.id());
}

/// Returns whether a ghost is being dragged.
pub fn move_ghost(state: &State, touch: &Touch) -> bool {
    match &state.ghost {
        Some(ghost) => {
            place_ghost(ghost, touch);
            true
        }
        None => false,
    }
}

fn remove_ghost(state: &mut State) {
    if let Some(ghost) = state.ghost.take() {
        ghost.element.remove();
    }
}

/// Shared tail of touch end and touch cancel.
pub fn finish_touch(state: &mut State, phase: PointerPhase, touch: Option<Touch>) {
    remove_ghost(state);
    let drop_at = touch.map(|touch| {
        client_to_canvas(&state.canvas, touch.client_x() as f64, touch.client_y() as f64)
    });
    let dropped = state.sketch.end_touch(&state.assets, phase, drop_at);
    report_drop(state, dropped);
    set_canvas_mode(&state.canvas, state.mode());
}
