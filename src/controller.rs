use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, HtmlElement, TouchEvent, TouchList, WheelEvent};

use crate::state::{PinchSession, TapTracker, ViewTransform};

/// Id of the wrapper element inserted around the target.
pub const CONTAINER_ID: &str = "canvas-container";

const CONTAINER_STYLE: &str =
    "width:100%;height:100%;overflow:hidden;display:flex;align-items:center;justify-content:center;";

/// Owns the zoom state for one wrapped target element.
///
/// Attaching wraps the target in a clipping container and wires the three
/// gesture families (Ctrl + wheel, two-finger pinch, double-tap reset).
/// Listeners are leaked with `forget`; the controller lives as long as the
/// page does.
pub struct ZoomController {
    container: HtmlElement,
    target: HtmlElement,
    view: Rc<RefCell<ViewTransform>>,
    pinch: Rc<RefCell<Option<PinchSession>>>,
    taps: Rc<RefCell<TapTracker>>,
}

impl ZoomController {
    pub fn attach(document: &Document, target: HtmlElement) -> Result<Self, JsValue> {
        // Wrap the target in a clipping container at its document position.
        let container: HtmlElement = document.create_element("div")?.dyn_into()?;
        container.set_id(CONTAINER_ID);
        container.style().set_css_text(CONTAINER_STYLE);
        let parent = target
            .parent_node()
            .ok_or_else(|| JsValue::from_str("zoom target has no parent node"))?;
        parent.insert_before(&container, Some(&target))?;
        container.append_child(&target)?;
        target
            .style()
            .set_property("transform-origin", "center center")?;

        let controller = Self {
            container,
            target,
            view: Rc::new(RefCell::new(ViewTransform::default())),
            pinch: Rc::new(RefCell::new(None)),
            taps: Rc::new(RefCell::new(TapTracker::default())),
        };

        // Suppressible defaults need non-passive listeners.
        let non_passive = AddEventListenerOptions::new();
        non_passive.set_passive(false);

        // Wheel zoom, gated on Ctrl so plain scrolling passes through.
        let wheel_cb = {
            let container = controller.container.clone();
            let target = controller.target.clone();
            let view = Rc::clone(&controller.view);
            Closure::wrap(Box::new(move |e: WheelEvent| {
                if !e.ctrl_key() {
                    return;
                }
                e.prevent_default();
                let rect = container.get_bounding_client_rect();
                let focal_x = e.client_x() as f64 - rect.left() - rect.width() / 2.0;
                let focal_y = e.client_y() as f64 - rect.top() - rect.height() / 2.0;
                let mut view = view.borrow_mut();
                if view.wheel_step(e.delta_y(), focal_x, focal_y) {
                    apply_transform(&target, &view);
                }
            }) as Box<dyn FnMut(_)>)
        };
        controller
            .container
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                wheel_cb.as_ref().unchecked_ref(),
                &non_passive,
            )?;
        wheel_cb.forget();

        // Pinch start: exactly two contacts open a session.
        let touch_start_cb = {
            let container = controller.container.clone();
            let view = Rc::clone(&controller.view);
            let pinch = Rc::clone(&controller.pinch);
            Closure::wrap(Box::new(move |e: TouchEvent| {
                let touches = e.touches();
                if touches.length() != 2 {
                    return;
                }
                e.prevent_default();
                if let Some((mid_x, mid_y, distance)) = two_finger_geometry(&touches) {
                    let rect = container.get_bounding_client_rect();
                    let mid_x = mid_x - rect.left() - rect.width() / 2.0;
                    let mid_y = mid_y - rect.top() - rect.height() / 2.0;
                    *pinch.borrow_mut() =
                        Some(PinchSession::begin(distance, mid_x, mid_y, *view.borrow()));
                }
            }) as Box<dyn FnMut(_)>)
        };
        controller
            .container
            .add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                touch_start_cb.as_ref().unchecked_ref(),
                &non_passive,
            )?;
        touch_start_cb.forget();

        // Pinch move: scale against the session's reference frame.
        let touch_move_cb = {
            let target = controller.target.clone();
            let view = Rc::clone(&controller.view);
            let pinch = Rc::clone(&controller.pinch);
            Closure::wrap(Box::new(move |e: TouchEvent| {
                let touches = e.touches();
                if touches.length() != 2 {
                    return;
                }
                e.prevent_default();
                if let Some(session) = &*pinch.borrow() {
                    if let Some((_, _, distance)) = two_finger_geometry(&touches) {
                        let mut view = view.borrow_mut();
                        if session.apply(distance, &mut view) {
                            apply_transform(&target, &view);
                        }
                    }
                }
            }) as Box<dyn FnMut(_)>)
        };
        controller
            .container
            .add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                touch_move_cb.as_ref().unchecked_ref(),
                &non_passive,
            )?;
        touch_move_cb.forget();

        // Touch end: drop the session once a finger lifts; a zero-contact
        // end is a tap, two taps inside the window reset the view.
        let touch_end_cb = {
            let target = controller.target.clone();
            let view = Rc::clone(&controller.view);
            let pinch = Rc::clone(&controller.pinch);
            let taps = Rc::clone(&controller.taps);
            Closure::wrap(Box::new(move |e: TouchEvent| {
                let remaining = e.touches().length();
                if remaining < 2 {
                    pinch.borrow_mut().take();
                }
                if remaining != 0 {
                    return;
                }
                if taps.borrow_mut().register(js_sys::Date::now()) {
                    let mut view = view.borrow_mut();
                    view.reset();
                    apply_transform(&target, &view);
                }
            }) as Box<dyn FnMut(_)>)
        };
        controller.container.add_event_listener_with_callback(
            "touchend",
            touch_end_cb.as_ref().unchecked_ref(),
        )?;
        touch_end_cb.forget();

        // A cancelled gesture tears down the session but is never a tap.
        let touch_cancel_cb = {
            let pinch = Rc::clone(&controller.pinch);
            Closure::wrap(Box::new(move |_: TouchEvent| {
                pinch.borrow_mut().take();
            }) as Box<dyn FnMut(_)>)
        };
        controller.container.add_event_listener_with_callback(
            "touchcancel",
            touch_cancel_cb.as_ref().unchecked_ref(),
        )?;
        touch_cancel_cb.forget();

        Ok(controller)
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn target(&self) -> &HtmlElement {
        &self.target
    }

    /// Snapshot of the current transform.
    pub fn view(&self) -> ViewTransform {
        *self.view.borrow()
    }
}

fn apply_transform(target: &HtmlElement, view: &ViewTransform) {
    let _ = target.style().set_property("transform", &view.to_css());
}

/// Client-space midpoint and distance for the first two touch contacts.
fn two_finger_geometry(touches: &TouchList) -> Option<(f64, f64, f64)> {
    let t0 = touches.item(0)?;
    let t1 = touches.item(1)?;
    let x0 = t0.client_x() as f64;
    let y0 = t0.client_y() as f64;
    let x1 = t1.client_x() as f64;
    let y1 = t1.client_y() as f64;
    let mid_x = (x0 + x1) / 2.0;
    let mid_y = (y0 + y1) / 2.0;
    let distance = (x1 - x0).hypot(y1 - y0);
    Some((mid_x, mid_y, distance))
}
