//! Tests for the agent server client
//!
//! Covers URL building, thread scoping metadata and error message mapping.
//! Requests themselves need a browser and a server, so they are not sent.

use super::*;

fn client(assistant_id: &str) -> TripIaClient {
    TripIaClient::new(&FrontendConfig::from_values(
        Some("http://localhost:2024/"),
        Some(assistant_id),
        None,
    ))
}

#[test]
fn urls_join_without_double_slashes() {
    let client = client("agent");
    assert_eq!(
        client.api_url("/threads/search"),
        "http://localhost:2024/threads/search"
    );
    assert_eq!(client.api_url("threads"), "http://localhost:2024/threads");
}

#[test]
fn graph_names_scope_threads_by_graph_id() {
    assert_eq!(
        client("agent").thread_metadata(),
        json!({ "graph_id": "agent" })
    );
}

#[test]
fn assistant_uuids_scope_threads_by_assistant_id() {
    let id = "6f0f3f0a-2a6b-4d3e-9a0c-1c3f7a3b9e21";
    assert_eq!(client(id).thread_metadata(), json!({ "assistant_id": id }));
    assert_eq!(client(id).assistant_id(), id);
}

#[test]
fn server_messages_are_preferred_over_status_reasons() {
    assert_eq!(
        error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail": "Thread not found"}"#),
        "Thread not found"
    );
    assert_eq!(
        error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
        "Internal Server Error"
    );
    assert_eq!(
        error_message(StatusCode::BAD_GATEWAY, r#"{"message": "  "}"#),
        "Bad Gateway"
    );
}

#[test]
fn status_errors_display_message_and_code() {
    let error = ApiError::Status {
        status: StatusCode::NOT_FOUND,
        message: "Thread not found".into(),
    };
    assert_eq!(error.to_string(), "Thread not found (404 Not Found)");
}
