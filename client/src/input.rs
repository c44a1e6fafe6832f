use web_sys::{HtmlCanvasElement, PointerEvent, TouchEvent};

use sitesketch_shared::{Point, PointerInput, PointerPhase};

use crate::dom::client_to_canvas;
use crate::util::now_ms;

pub fn phase_of(event_type: &str) -> Option<PointerPhase> {
    match event_type {
        "pointerdown" | "touchstart" => Some(PointerPhase::Press),
        "pointermove" | "touchmove" => Some(PointerPhase::Move),
        "pointerup" | "touchend" => Some(PointerPhase::Release),
        "pointercancel" | "lostpointercapture" | "touchcancel" => Some(PointerPhase::Cancel),
        _ => None,
    }
}

/// Touch contacts arrive through the touch listeners instead.
pub fn is_touch_event(event: &PointerEvent) -> bool {
    event.pointer_type() == "touch"
}

pub fn from_pointer(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<PointerInput> {
    if is_touch_event(event) {
        return None;
    }
    let phase = phase_of(&event.type_())?;
    let (point, _) = client_to_canvas(canvas, event.client_x() as f64, event.client_y() as f64);
    Some(PointerInput::new(phase, point, now_ms()))
}

/// Uses the first active contact; on end/cancel the contact that lifted.
pub fn from_touch(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<PointerInput> {
    let phase = phase_of(&event.type_())?;
    let touch = match phase {
        PointerPhase::Press | PointerPhase::Move => event.touches().get(0),
        PointerPhase::Release | PointerPhase::Cancel => event.changed_touches().get(0),
    };
    let point = match touch {
        Some(touch) => {
            client_to_canvas(canvas, touch.client_x() as f64, touch.client_y() as f64).0
        }
        None if matches!(phase, PointerPhase::Release | PointerPhase::Cancel) => Point::default(),
        None => return None,
    };
    Some(PointerInput::new(phase, point, now_ms()))
}
