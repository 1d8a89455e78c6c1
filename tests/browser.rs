#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, WheelEvent, WheelEventInit};

use canvas_zoom::boot;
use canvas_zoom::controller::{CONTAINER_ID, ZoomController};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Drops leftovers from earlier tests; all tests share one page.
fn clear_page(document: &Document) {
    while let Some(stale) = document.get_element_by_id(CONTAINER_ID) {
        stale.remove();
    }
    while let Some(stale) = document.get_element_by_id(boot::TARGET_ID) {
        stale.remove();
    }
}

fn insert_target(document: &Document, id: &str) -> HtmlElement {
    let target: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    target.set_id(id);
    target.style().set_css_text("width:200px;height:100px;");
    document.body().unwrap().append_child(&target).unwrap();
    target
}

fn wheel_event(delta_y: f64, client_x: f64, client_y: f64, ctrl: bool) -> WheelEvent {
    let init = WheelEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_ctrl_key(ctrl);
    init.set_delta_y(delta_y);
    init.set_client_x(client_x as i32);
    init.set_client_y(client_y as i32);
    WheelEvent::new_with_event_init_dict("wheel", &init).unwrap()
}

#[wasm_bindgen_test]
fn attach_wraps_target_and_sets_origin() {
    let document = document();
    clear_page(&document);
    let target = insert_target(&document, "wrap-me");

    let controller = ZoomController::attach(&document, target.clone()).unwrap();

    let container = controller.container();
    assert_eq!(container.id(), CONTAINER_ID);
    assert!(container.style().css_text().contains("overflow:hidden"));
    let parent: HtmlElement = target.parent_node().unwrap().dyn_into().unwrap();
    assert_eq!(parent.id(), CONTAINER_ID);
    assert_eq!(
        target.style().get_property_value("transform-origin").unwrap(),
        "center center"
    );

    controller.container().remove();
}

#[wasm_bindgen_test]
fn ctrl_wheel_zooms_and_plain_wheel_does_not() {
    let document = document();
    clear_page(&document);
    let target = insert_target(&document, "zoom-me");
    let controller = ZoomController::attach(&document, target.clone()).unwrap();

    let rect = controller.container().get_bounding_client_rect();
    let center_x = rect.left() + rect.width() / 2.0;
    let center_y = rect.top() + rect.height() / 2.0;

    // Plain wheel must pass through untouched.
    controller
        .container()
        .dispatch_event(&wheel_event(-120.0, center_x, center_y, false))
        .unwrap();
    assert_eq!(controller.view().scale, 1.0);
    assert_eq!(
        target.style().get_property_value("transform").unwrap(),
        ""
    );

    // Ctrl + wheel up zooms in by one notch.
    controller
        .container()
        .dispatch_event(&wheel_event(-120.0, center_x, center_y, true))
        .unwrap();
    assert_eq!(controller.view().scale, 1.1);
    let transform = target.style().get_property_value("transform").unwrap();
    assert!(transform.ends_with("scale(1.1)"), "got: {transform}");

    // Ctrl + wheel down steps back out multiplicatively.
    controller
        .container()
        .dispatch_event(&wheel_event(120.0, center_x, center_y, true))
        .unwrap();
    assert!((controller.view().scale - 0.99).abs() < 1e-12);

    controller.container().remove();
}

#[wasm_bindgen_test]
fn init_is_single_shot() {
    let document = document();
    clear_page(&document);
    insert_target(&document, boot::TARGET_ID);

    assert!(boot::init_now(&document));
    assert!(!boot::init_now(&document));
    let containers = document
        .query_selector_all(&format!("#{CONTAINER_ID}"))
        .unwrap();
    assert_eq!(containers.length(), 1);

    clear_page(&document);
}

#[wasm_bindgen_test]
fn init_without_target_is_a_noop() {
    let document = document();
    clear_page(&document);

    assert!(!boot::init_now(&document));
    assert!(document.get_element_by_id(CONTAINER_ID).is_none());
}
