//! Server-side render tests for the external component guards.

use serde_json::{Value, json};
use tripia_shared::models::UiDescriptor;
use yew::LocalServerRenderer;

use super::custom_components::{CustomComponents, CustomComponentsProps};
use super::loader::LoaderHandle;
use super::safe_component::{SafeComponent, SafeComponentProps};

fn descriptor(value: Value) -> Option<UiDescriptor> {
    UiDescriptor::from_value(&value)
}

async fn render(descriptor: Option<UiDescriptor>) -> String {
    LocalServerRenderer::<SafeComponent>::with_props(SafeComponentProps {
        descriptor,
        message_id: Some("a1".into()),
        loader: LoaderHandle::default(),
        on_open_artifact: yew::Callback::noop(),
    })
    .render()
    .await
}

fn flights(segments: Value) -> Value {
    json!({
        "id": "ui-1",
        "name": "flights",
        "props": {"flights": [{
            "id": "f1",
            "airline": "TAP",
            "segments": segments
        }]},
        "metadata": {"message_id": "a1"}
    })
}

#[tokio::test]
async fn missing_descriptor_shows_notice() {
    let html = render(None).await;
    assert!(html.contains("Missing Component Data"));
    assert!(html.contains("Component data is missing or invalid."));
}

#[tokio::test]
async fn descriptor_without_id_is_not_loaded() {
    for value in [
        json!({"name": "flights", "props": {}}),
        json!({"id": "", "name": "flights"}),
    ] {
        let html = render(descriptor(value)).await;
        assert!(html.contains("Invalid Component Data"));
        assert!(html.contains("missing required"));
        assert!(!html.contains("data-component"));
    }
}

#[tokio::test]
async fn valid_flights_render() {
    let html = render(descriptor(flights(json!([
        {"origin": "GIG", "destination": "LIS", "departure_time": "22:10", "arrival_time": "11:35"}
    ]))))
    .await;
    assert!(html.contains("data-component=\"flights\""));
    assert!(html.contains("GIG → LIS"));
    assert!(html.contains("Direct"));
}

#[tokio::test]
async fn flight_data_failures_get_their_own_notice() {
    let html = render(descriptor(flights(json!([])))).await;
    assert!(html.contains("Flight Data Processing Error"));
    assert!(html.contains("<details"));
    assert!(html.contains("Error details"));
    assert!(html.contains("convertApiFlightToItinerary: flight f1 has no segments"));
}

#[tokio::test]
async fn unknown_components_fail_generically() {
    let html = render(descriptor(json!({"id": "ui-9", "name": "weather"}))).await;
    assert!(html.contains("Component Loading Failed"));
    assert!(html.contains("weather"));
}

#[tokio::test]
async fn a_failing_fragment_leaves_its_siblings_alone() {
    let html = LocalServerRenderer::<CustomComponents>::with_props(CustomComponentsProps {
        message_id: "a1".into(),
        ui: vec![
            flights(json!([])),
            json!({
                "id": "ui-2",
                "name": "hotels",
                "props": {"hotels": [{"name": "Hotel Avenida", "rating": 4.5}]},
                "metadata": {"message_id": "a1"}
            }),
            json!({
                "id": "ui-3",
                "name": "hotels",
                "props": {"hotels": [{"name": "Elsewhere Inn"}]},
                "metadata": {"message_id": "a2"}
            }),
        ],
        loader: LoaderHandle::default(),
        on_open_artifact: yew::Callback::noop(),
    })
    .render()
    .await;

    assert!(html.contains("Flight Data Processing Error"));
    assert!(html.contains("Hotel Avenida"));
    assert!(!html.contains("Elsewhere Inn"));
}
