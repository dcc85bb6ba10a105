//! Browser tests for failures that surface after a component is mounted.

use std::time::Duration;

use serde_json::{Value, json};
use wasm_bindgen_test::*;
use web_sys::{Element, ErrorEvent, ErrorEventInit};
use yew::AppHandle;

use super::custom_components::{CustomComponents, CustomComponentsProps};
use super::loader::LoaderHandle;

wasm_bindgen_test_configure!(run_in_browser);

fn flights(extra: Value) -> Value {
    let mut props = json!({"flights": [{
        "id": "f1",
        "airline": "TAP",
        "segments": [{"origin": "GIG", "destination": "LIS"}]
    }]});
    if let (Some(props), Value::Object(extra)) = (props.as_object_mut(), extra) {
        props.extend(extra);
    }
    json!({"id": "ui-1", "name": "flights", "props": props, "metadata": {"message_id": "a1"}})
}

fn hotels() -> Value {
    json!({
        "id": "ui-2",
        "name": "hotels",
        "props": {"hotels": [{"name": "Hotel Avenida"}]},
        "metadata": {"message_id": "a1"}
    })
}

fn mount(ui: Vec<Value>) -> (Element, AppHandle<CustomComponents>) {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("document");
    let root = document.create_element("div").expect("root element");
    document
        .body()
        .expect("body")
        .append_child(&root)
        .expect("attach root");
    let handle = yew::Renderer::<CustomComponents>::with_root_and_props(
        root.clone(),
        CustomComponentsProps {
            message_id: "a1".into(),
            ui,
            loader: LoaderHandle::default(),
            on_open_artifact: yew::Callback::noop(),
        },
    )
    .render();
    (root, handle)
}

async fn settle() {
    yew::platform::time::sleep(Duration::from_millis(50)).await;
}

fn unmount(root: Element, handle: AppHandle<CustomComponents>) {
    handle.destroy();
    root.remove();
}

#[wasm_bindgen_test]
async fn mount_failure_replaces_only_its_fragment() {
    let (root, handle) = mount(vec![flights(json!({"selected_flight": "XX999"})), hotels()]);
    settle().await;

    let html = root.inner_html();
    assert!(html.contains("Flights Component Error"));
    assert!(html.contains("the flights component"));
    assert!(!html.contains("GIG → LIS"));
    assert!(html.contains("Hotel Avenida"));

    unmount(root, handle);
}

#[wasm_bindgen_test]
async fn selected_flight_in_the_list_mounts_normally() {
    let (root, handle) = mount(vec![flights(json!({"selected_flight": "f1"}))]);
    settle().await;

    let html = root.inner_html();
    assert!(html.contains("GIG → LIS"));
    assert!(!html.contains("Component Error"));

    unmount(root, handle);
}

#[wasm_bindgen_test]
async fn known_window_errors_switch_to_the_failure_notice() {
    let (root, handle) = mount(vec![flights(json!({}))]);
    settle().await;
    assert!(root.inner_html().contains("GIG → LIS"));

    let init = ErrorEventInit::new();
    init.set_message("TypeError: x is undefined at convertApiFlightToItinerary (bundle.js:1:2)");
    let event = ErrorEvent::new_with_event_init_dict("error", &init).expect("error event");
    web_sys::window()
        .expect("window")
        .dispatch_event(&event)
        .expect("dispatch");
    settle().await;

    let html = root.inner_html();
    assert!(html.contains("Flight Data Processing Error"));
    assert!(html.contains("convertApiFlightToItinerary"));
    assert!(!html.contains("GIG → LIS"));

    unmount(root, handle);
}
