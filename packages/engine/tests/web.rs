//! Browser tests: `wasm-pack test --headless --chrome packages/engine`
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

use arcfield_engine::web::{start_canvas_backdrop, start_gpu_backdrop};
use arcfield_engine::{ArcField, GpuBackdrop};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_id(id);
    canvas.style().set_property("width", "640px").unwrap();
    canvas.style().set_property("height", "360px").unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn facade_rejects_bad_config_json() {
    assert!(ArcField::new(100.0, 100.0, 1.0, Some("{ nope".into())).is_err());
    assert!(GpuBackdrop::new(100.0, 100.0, 1.0, Some(r#"{"grid":{"cell_size":-1}}"#.into())).is_err());
    assert!(ArcField::new(100.0, 100.0, 1.0, None).is_ok());
}

#[wasm_bindgen_test]
fn canvas_backdrop_starts_and_stops() {
    let canvas = mount_canvas("arcfield-test-2d");
    let mut handle = start_canvas_backdrop("arcfield-test-2d", None).unwrap();
    assert!(handle.running());
    assert_eq!(canvas.width(), (640.0 * web_sys::window().unwrap().device_pixel_ratio()).round() as u32);
    handle.stop();
    assert!(!handle.running());
    canvas.remove();
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(start_canvas_backdrop("arcfield-missing", None).is_err());
}

#[wasm_bindgen_test]
fn gpu_backdrop_mode_scopes() {
    let canvas = mount_canvas("arcfield-test-gl");
    // headless browsers without WebGL2 report an error rather than panicking
    if let Ok(mut handle) = start_gpu_backdrop("arcfield-test-gl", "idle", false, None) {
        let mut scope = handle.push_mode("blog");
        assert_eq!(handle.mode(), "blog");
        scope.release();
        assert_eq!(handle.mode(), "idle");
        assert_eq!(handle.hijack_phase(), "disabled");
        handle.stop();
        assert!(!handle.running());
    }
    canvas.remove();
}
