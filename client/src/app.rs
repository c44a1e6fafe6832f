use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{
    CanvasRenderingContext2d, DragEvent, Element, Event, EventTarget, HtmlButtonElement,
    HtmlCanvasElement, HtmlElement, HtmlImageElement, PointerEvent, TouchEvent,
};

use sitesketch_shared::{hydrate, AssetGate, EditorConfig, PointerPhase, Sketch, Tool};

use crate::actions::{
    abandon_palette_drag, apply_input, begin_palette_drag, clear_board, drop_palette_image,
    finish_touch, load_diagram, move_ghost, select_color, select_tool, start_touch_drag,
    sync_tool_ui,
};
use crate::dom::{resize_canvas, set_image_class, surface};
use crate::error::InitError;
use crate::input::{from_pointer, from_touch, phase_of};
use crate::logging;
use crate::palette::{
    color_buttons, image_failed, image_loaded, palette_images, settled_outcome, show_readiness,
};
use crate::render::redraw;
use crate::state::{Controls, State};
use crate::util::id_seed;

/// Handle returned to the embedding page.
#[wasm_bindgen]
pub struct SketchEditor {
    state: Rc<RefCell<State>>,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl SketchEditor {
    /// The current diagram as a JSON array string.
    #[wasm_bindgen(js_name = getDiagram)]
    pub fn get_diagram(&self) -> Option<String> {
        let Ok(state) = self.state.try_borrow() else {
            log::warn!("getDiagram called while the editor is busy");
            return None;
        };
        match state.sketch.serialize() {
            Ok(json) => Some(json),
            Err(err) => {
                log::error!("{err}");
                None
            }
        }
    }

    /// Replaces the diagram. Invalid input is logged and ignored.
    #[wasm_bindgen(js_name = loadDiagram)]
    pub fn load_diagram(&self, payload: &str) -> bool {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            log::warn!("loadDiagram called while the editor is busy");
            return false;
        };
        load_diagram(&mut state, payload)
    }

    /// Loads a saved diagram once every palette image is ready. Resolves to
    /// whether the diagram was restored; never rejects.
    pub fn hydrate(&self, saved: String) -> js_sys::Promise {
        let ready = match self.state.try_borrow_mut() {
            Ok(mut state) => state.assets.take_ready(),
            Err(_) => {
                log::warn!("hydrate called while the editor is busy");
                return js_sys::Promise::resolve(&JsValue::FALSE);
            }
        };
        let Some(ready) = ready else {
            log::warn!("Saved diagram was already hydrated");
            return js_sys::Promise::resolve(&JsValue::FALSE);
        };
        let state = self.state.clone();
        future_to_promise(async move {
            let restored = hydrate(ready, || {
                let mut state = state.borrow_mut();
                let count = state.sketch.load(&saved)?;
                redraw(&state);
                sync_tool_ui(&state);
                Ok(count)
            })
            .await;
            match restored {
                Ok(count) => {
                    log::info!("Restored {count} saved elements");
                    Ok(JsValue::TRUE)
                }
                Err(err) => {
                    log::error!("Saved diagram not restored: {err}");
                    Ok(JsValue::FALSE)
                }
            }
        })
    }
}

/// Builds an editor over the given surfaces with the default configuration.
/// Returns `undefined` when a surface is missing or the canvas has no 2D
/// context.
#[wasm_bindgen]
pub fn initialize(
    canvas: Option<Element>,
    palette: Option<Element>,
    colors: Option<Element>,
    clear: Option<Element>,
    eraser: Option<Element>,
    draw: Option<Element>,
    status: Option<Element>,
) -> Option<SketchEditor> {
    initialize_with_config(canvas, palette, colors, clear, eraser, draw, status, None)
}

/// Like `initialize`, with a JSON `EditorConfig` overriding the defaults.
#[wasm_bindgen(js_name = initializeWithConfig)]
#[allow(clippy::too_many_arguments)]
pub fn initialize_with_config(
    canvas: Option<Element>,
    palette: Option<Element>,
    colors: Option<Element>,
    clear: Option<Element>,
    eraser: Option<Element>,
    draw: Option<Element>,
    status: Option<Element>,
    config: Option<String>,
) -> Option<SketchEditor> {
    console_error_panic_hook::set_once();
    if let Some(window) = web_sys::window() {
        logging::init(&window);
    }
    let surfaces = Surfaces {
        canvas,
        palette,
        colors,
        clear,
        eraser,
        draw,
        status,
    };
    match start_editor(surfaces, config.as_deref()) {
        Ok(editor) => Some(editor),
        Err(err) => {
            log::error!("Editor initialization failed: {err}");
            None
        }
    }
}

struct Surfaces {
    canvas: Option<Element>,
    palette: Option<Element>,
    colors: Option<Element>,
    clear: Option<Element>,
    eraser: Option<Element>,
    draw: Option<Element>,
    status: Option<Element>,
}

fn start_editor(surfaces: Surfaces, config: Option<&str>) -> Result<SketchEditor, InitError> {
    let canvas: HtmlCanvasElement = surface(surfaces.canvas, "canvas")?;
    let palette: HtmlElement = surface(surfaces.palette, "figure palette")?;
    let colors_el: HtmlElement = surface(surfaces.colors, "color buttons")?;
    let clear: HtmlButtonElement = surface(surfaces.clear, "clear button")?;
    let eraser: HtmlButtonElement = surface(surfaces.eraser, "eraser button")?;
    let draw: HtmlButtonElement = surface(surfaces.draw, "draw button")?;
    let status: Element = surface(surfaces.status, "status element")?;

    let ctx = canvas
        .get_context("2d")?
        .ok_or(InitError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| InitError::NoContext)?;

    let config = match config {
        Some(json) => EditorConfig::from_json(json)?,
        None => EditorConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| InitError::Js("Missing window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| InitError::Js("Missing document".into()))?;

    let images = palette_images(&palette);
    let assets = AssetGate::new(images.iter().map(|image| image.id()));
    let colors = color_buttons(&colors_el);
    log::info!(
        "Starting editor: {} palette images, {} colors",
        images.len(),
        colors.len()
    );

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        ctx,
        controls: Controls {
            colors: colors.clone(),
            eraser: eraser.clone(),
            draw: draw.clone(),
            status,
        },
        sketch: Sketch::new(config, id_seed()),
        assets,
        ghost: None,
    }));

    let mut listeners = Vec::new();
    preload_images(&state, &images, &mut listeners);

    let canvas_target: &EventTarget = canvas.as_ref();
    let document_target: &EventTarget = document.as_ref();
    let active = EventListenerOptions::enable_prevent_default();

    for event_type in [
        "pointerdown",
        "pointermove",
        "pointerup",
        "pointercancel",
        "lostpointercapture",
    ] {
        let pointer_state = state.clone();
        let pointer_canvas = canvas.clone();
        listeners.push(EventListener::new(canvas_target, event_type, move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let Some(input) = from_pointer(&pointer_canvas, event) else {
                return;
            };
            if input.phase == PointerPhase::Press {
                if let Err(err) = pointer_canvas.set_pointer_capture(event.pointer_id()) {
                    log::debug!("Pointer capture refused: {err:?}");
                }
            }
            apply_input(&mut pointer_state.borrow_mut(), input);
        }));
    }

    for event_type in ["touchstart", "touchmove"] {
        let touch_state = state.clone();
        let touch_canvas = canvas.clone();
        listeners.push(EventListener::new_with_options(
            canvas_target,
            event_type,
            active,
            move |event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                event.prevent_default();
                if let Some(input) = from_touch(&touch_canvas, event) {
                    apply_input(&mut touch_state.borrow_mut(), input);
                }
            },
        ));
    }

    {
        let ghost_state = state.clone();
        listeners.push(EventListener::new_with_options(
            document_target,
            "touchmove",
            active,
            move |event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                if move_ghost(&ghost_state.borrow(), &touch) {
                    event.prevent_default();
                }
            },
        ));
    }

    for event_type in ["touchend", "touchcancel"] {
        let end_state = state.clone();
        listeners.push(EventListener::new(
            document_target,
            event_type,
            move |event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some(phase) = phase_of(&event.type_()) else {
                    return;
                };
                finish_touch(
                    &mut end_state.borrow_mut(),
                    phase,
                    event.changed_touches().get(0),
                );
            },
        ));
    }

    {
        let palette_state = state.clone();
        let palette_document = document.clone();
        listeners.push(EventListener::new_with_options(
            palette.as_ref(),
            "touchstart",
            active,
            move |event| {
                let Some(image) = event
                    .target()
                    .and_then(|target| target.dyn_into::<HtmlImageElement>().ok())
                else {
                    return;
                };
                let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|event| event.touches().get(0))
                else {
                    return;
                };
                event.prevent_default();
                start_touch_drag(
                    &mut palette_state.borrow_mut(),
                    &palette_document,
                    &image,
                    &touch,
                );
            },
        ));
    }

    {
        let drag_state = state.clone();
        listeners.push(EventListener::new(palette.as_ref(), "dragstart", move |event| {
            let Some(image) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlImageElement>().ok())
            else {
                return;
            };
            let image_id = image.id();
            if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(|e| e.data_transfer()) {
                let _ = transfer.set_data("text/plain", &image_id);
                transfer.set_effect_allowed("copy");
            }
            begin_palette_drag(&mut drag_state.borrow_mut(), &image_id);
        }));
    }

    {
        let end_state = state.clone();
        listeners.push(EventListener::new(palette.as_ref(), "dragend", move |_| {
            abandon_palette_drag(&mut end_state.borrow_mut());
        }));
    }

    listeners.push(EventListener::new_with_options(
        canvas_target,
        "dragover",
        active,
        |event| {
            event.prevent_default();
            if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(|e| e.data_transfer()) {
                transfer.set_drop_effect("copy");
            }
        },
    ));

    {
        let drop_state = state.clone();
        listeners.push(EventListener::new_with_options(
            canvas_target,
            "drop",
            active,
            move |event| {
                event.prevent_default();
                let Some(event) = event.dyn_ref::<DragEvent>() else {
                    return;
                };
                drop_palette_image(
                    &mut drop_state.borrow_mut(),
                    event.client_x() as f64,
                    event.client_y() as f64,
                );
            },
        ));
    }

    for button in &colors {
        let color_state = state.clone();
        let color = button.id();
        listeners.push(EventListener::new(button.as_ref(), "click", move |_| {
            select_color(&mut color_state.borrow_mut(), &color);
        }));
    }

    {
        let clear_state = state.clone();
        listeners.push(EventListener::new(clear.as_ref(), "click", move |_| {
            clear_board(&mut clear_state.borrow_mut());
        }));
    }

    for (button, tool) in [(&eraser, Tool::Erase), (&draw, Tool::Draw)] {
        let tool_state = state.clone();
        listeners.push(EventListener::new(button.as_ref(), "click", move |_| {
            select_tool(&mut tool_state.borrow_mut(), tool);
        }));
    }

    for event_type in ["load", "resize"] {
        let resize_state = state.clone();
        listeners.push(EventListener::new(window.as_ref(), event_type, move |_| {
            resize_canvas(&mut resize_state.borrow_mut());
        }));
    }

    {
        let mut state = state.borrow_mut();
        resize_canvas(&mut state);
        sync_tool_ui(&state);
        show_readiness(&state);
    }

    Ok(SketchEditor {
        state,
        _listeners: listeners,
    })
}

/// Registers every palette image with the gate. Images that already
/// finished settle right away, the rest through load/error listeners.
fn preload_images(
    state: &Rc<RefCell<State>>,
    images: &[HtmlImageElement],
    listeners: &mut Vec<EventListener>,
) {
    for image in images {
        match settled_outcome(image) {
            Some(true) => {
                let mut state = state.borrow_mut();
                image_loaded(&mut state, image);
            }
            Some(false) => {
                let mut state = state.borrow_mut();
                image_failed(&mut state, image);
            }
            None => {
                set_image_class(image, "loading");
                let target: &EventTarget = image.as_ref();

                let load_state = state.clone();
                let load_image = image.clone();
                listeners.push(EventListener::once(target, "load", move |_: &Event| {
                    let mut state = load_state.borrow_mut();
                    image_loaded(&mut state, &load_image);
                    // Figures waiting on this image can be drawn now.
                    redraw(&state);
                }));

                let error_state = state.clone();
                let error_image = image.clone();
                listeners.push(EventListener::once(target, "error", move |_: &Event| {
                    image_failed(&mut error_state.borrow_mut(), &error_image);
                }));
            }
        }
    }
}
