#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use js_sys::Reflect;
use vidgrid_wasm::GridRunner;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE_ID: &str = "vidgrid-fixture";

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("document")
}

/// Fresh copy of the page markup: container, eight slots, two dividers.
fn mount_page() -> Document {
    let document = document();
    if let Some(stale) = document.get_element_by_id(FIXTURE_ID) {
        stale.remove();
    }
    let mut markup = String::from(r#"<div id="video-grid">"#);
    for n in 1..=8 {
        markup.push_str(&format!(
            r#"<div class="video-slot"><video id="player{n}"></video><label class="upload-button">Upload</label></div>"#
        ));
    }
    markup.push_str(r#"<div id="divider-column"></div><div id="divider-row"></div></div>"#);

    let root = document.create_element("div").expect("create fixture");
    root.set_id(FIXTURE_ID);
    root.set_inner_html(&markup);
    document
        .body()
        .expect("body")
        .append_child(&root)
        .expect("mount fixture");
    document
}

fn element(document: &Document, id: &str) -> HtmlElement {
    document
        .get_element_by_id(id)
        .expect("element present")
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn slot_wrapper(document: &Document, n: u8) -> HtmlElement {
    element(document, &format!("player{n}"))
        .parent_element()
        .expect("slot wrapper")
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).expect("field")
}

#[wasm_bindgen_test]
fn layout_switch_hides_unused_slots() {
    let document = mount_page();
    let mut runner = GridRunner::new(None).expect("runner");

    let switch = runner.apply_layout(3);
    assert_eq!(field(&switch, "visible_slots").as_f64(), Some(3.0));

    let hidden = slot_wrapper(&document, 4);
    assert_eq!(
        hidden.style().get_property_value("display").as_deref(),
        Ok("none")
    );
    let shown = slot_wrapper(&document, 3);
    assert_eq!(shown.style().get_property_value("display").as_deref(), Ok(""));

    assert!(runner.apply_layout(9).is_null());
}

#[wasm_bindgen_test]
fn divider_drag_moves_the_bar_and_toggles_dragging() {
    let document = mount_page();
    let mut runner = GridRunner::new(None).expect("runner");
    runner.apply_layout(2);
    runner.set_container_rect(0.0, 0.0, 1000.0, 500.0);

    let down = runner.divider_pointer_down(0, 7, 0, 500.0, 100.0);
    assert_eq!(field(&down, "outcome").as_string().as_deref(), Some("forwarded"));
    let command = field(&down, "capture_command");
    assert_eq!(field(&command, "kind").as_string().as_deref(), Some("acquire"));

    let bar = element(&document, "divider-column");
    assert!(bar.class_list().contains("dragging"));

    runner.capture_acquired(7);
    runner.pointer_move(7, 300.0, 100.0);
    assert_eq!(bar.style().get_property_value("left").as_deref(), Ok("30%"));

    let up = runner.pointer_up(7, 0, 300.0, 100.0);
    let command = field(&up, "capture_command");
    assert_eq!(field(&command, "kind").as_string().as_deref(), Some("release"));
    assert!(!bar.class_list().contains("dragging"));
    assert!(!runner.is_divider_input_active());
}

#[wasm_bindgen_test]
fn invalid_config_falls_back_to_defaults() {
    mount_page();
    let mut runner = GridRunner::new(Some("{\"min_split_percent\":".to_string())).expect("runner");
    let logs: Vec<String> = runner
        .take_logs()
        .iter()
        .filter_map(|line| line.as_string())
        .collect();
    assert!(
        logs.iter()
            .any(|line| line.starts_with("config outcome=defaults")),
        "{logs:?}"
    );
}

#[wasm_bindgen_test]
fn unknown_divider_code_is_ignored() {
    mount_page();
    let mut runner = GridRunner::new(None).expect("runner");
    let dispatch = runner.divider_pointer_down(5, 1, 0, 0.0, 0.0);
    assert_eq!(
        field(&dispatch, "ignored_reason").as_string().as_deref(),
        Some("invalid_target")
    );
}
