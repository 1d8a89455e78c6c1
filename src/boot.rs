use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, HtmlElement};

use crate::controller::{CONTAINER_ID, ZoomController};
use crate::util::clog;

/// Id of the element the controller takes over.
pub const TARGET_ID: &str = "canvas";

/// Grace period between document readiness and gesture wiring. Host scripts
/// populate the target asynchronously after load.
const INIT_DELAY_MS: u32 = 1_000;

/// Stage one of the lifecycle: await the document's structural load, then
/// schedule the delayed initialization.
pub fn schedule() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let loaded = Closure::once(defer_init);
        let once = AddEventListenerOptions::new();
        once.set_once(true);
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            loaded.as_ref().unchecked_ref(),
            &once,
        );
        loaded.forget();
    } else {
        defer_init();
    }
}

/// Stage two: a one-shot timer, after which gestures are wired.
fn defer_init() {
    Timeout::new(INIT_DELAY_MS, || {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            init_now(&document);
        }
    })
    .forget();
}

/// Attaches the controller to the target element, once.
///
/// Returns `false` without touching the document when the wrapper already
/// exists (initialization is single-shot, a second call never attaches
/// duplicate listeners) or when the target is absent, which is a legitimate
/// state on pages without a zoomable surface.
pub fn init_now(document: &Document) -> bool {
    if document.get_element_by_id(CONTAINER_ID).is_some() {
        return false;
    }
    let Some(target) = document.get_element_by_id(TARGET_ID) else {
        return false;
    };
    let Ok(target) = target.dyn_into::<HtmlElement>() else {
        return false;
    };
    match ZoomController::attach(document, target) {
        Ok(_) => true,
        Err(err) => {
            clog(&format!("zoom init failed: {err:?}"));
            false
        }
    }
}
