use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlImageElement};

use sitesketch_shared::Readiness;

use crate::dom::{set_image_class, set_status};
use crate::state::{PaletteImage, State};

fn children_of<T: JsCast>(container: &Element, selector: &str) -> Vec<T> {
    let Ok(nodes) = container.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Palette images with a usable id; the id doubles as the image identifier.
pub fn palette_images(palette: &HtmlElement) -> Vec<HtmlImageElement> {
    children_of::<HtmlImageElement>(palette, "img")
        .into_iter()
        .filter(|image| {
            if image.id().is_empty() {
                log::warn!("Ignoring palette image without id: {}", image.src());
                return false;
            }
            true
        })
        .collect()
}

/// Color buttons carry their color as element id.
pub fn color_buttons(container: &HtmlElement) -> Vec<HtmlButtonElement> {
    children_of(container, "button")
}

/// Outcome for an image that finished before anyone could listen.
pub fn settled_outcome(image: &HtmlImageElement) -> Option<bool> {
    if !image.complete() {
        return None;
    }
    Some(image.natural_width() > 0)
}

pub fn image_loaded(state: &mut State, image: &HtmlImageElement) {
    let image_id = image.id();
    set_image_class(image, "loaded");
    state.assets.loaded(&image_id, PaletteImage(image.clone()));
    show_readiness(state);
}

pub fn image_failed(state: &mut State, image: &HtmlImageElement) {
    set_image_class(image, "error");
    state
        .assets
        .failed(&image.id(), format!("could not load {}", image.src()));
    show_readiness(state);
}

pub fn show_readiness(state: &State) {
    let status = &state.controls.status;
    if state.assets.total() == 0 {
        set_status(status, "empty", "No palette images");
        return;
    }
    match state.assets.readiness() {
        Readiness::Loading { loaded, total } => {
            set_status(status, "loading", &format!("Loading images {loaded}/{total}"))
        }
        Readiness::Ready => set_status(status, "ready", "Images ready"),
        Readiness::Failed(error) => set_status(status, "error", &error.to_string()),
    }
}
