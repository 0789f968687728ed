//! Browser tests for the viewport handle.
//!
//! Run with: wasm-pack test --headless --firefox

#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use xlgrid::render::Overlay;
use xlgrid::web::ViewportHandle;
use xlgrid::{CellRange, Effect, Rect};

wasm_bindgen_test_configure!(run_in_browser);

fn mount() -> (HtmlElement, HtmlElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    let parent: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    parent.style().set_property("width", "400px").unwrap();
    parent.style().set_property("height", "300px").unwrap();
    let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    parent.append_child(&container).unwrap();
    document.body().unwrap().append_child(&parent).unwrap();
    (parent, container)
}

#[wasm_bindgen_test]
fn create_adds_spacer_and_overlay_layer() {
    let (parent, container) = mount();
    let handle = ViewportHandle::create(container.clone()).unwrap();
    assert_eq!(container.child_element_count(), 1);
    assert_eq!(parent.child_element_count(), 2);
    assert_eq!(container.style().get_property_value("overflow").unwrap(), "auto");

    handle.detach();
    assert_eq!(container.child_element_count(), 0);
    assert_eq!(parent.child_element_count(), 1);
    parent.remove();
}

#[wasm_bindgen_test]
fn dom_effects_are_applied_and_host_effects_passed_on() {
    let (parent, container) = mount();
    let handle = ViewportHandle::create(container.clone()).unwrap();

    assert!(handle.apply(&Effect::ResizeSpacer {
        width: 5_000.0,
        height: 9_000.0
    }));
    assert!(handle.apply(&Effect::ScrollContainer {
        left: 0.0,
        top: 120.0
    }));
    assert_eq!(handle.scroll_offset(), (0.0, 120.0));

    assert!(!handle.apply(&Effect::AreaSelected {
        range: CellRange::new(1, 1, 2, 2)
    }));
    assert!(!handle.apply(&Effect::Render));
    parent.remove();
}

#[wasm_bindgen_test]
fn overlay_places_outline_and_editor() {
    let (parent, container) = mount();
    let handle = ViewportHandle::create(container).unwrap();
    let overlay = Overlay {
        cell_outline: Some(Rect::new(30.0, 23.0, 100.0, 24.0)),
        ..Overlay::default()
    };
    handle.place_overlay(&overlay, true);
    let editor = handle.editor().style();
    assert_eq!(editor.get_property_value("display").unwrap(), "block");
    assert_eq!(editor.get_property_value("left").unwrap(), "30px");

    handle.place_overlay(&Overlay::default(), false);
    assert_eq!(
        handle.editor().style().get_property_value("display").unwrap(),
        "none"
    );
    parent.remove();
}
