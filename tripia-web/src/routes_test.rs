//! Tests for the routing system
//!
//! Validates route recognition and the query-string state of the thread page.

use super::*;
use strum::IntoEnumIterator;

/// Tests route paths
#[test]
fn test_route_paths() {
    assert_eq!(MainRoute::Home.to_path(), "/");
    assert_eq!(MainRoute::recognize("/"), Some(MainRoute::Home));
    assert_eq!(
        MainRoute::recognize("/flights/unknown"),
        Some(MainRoute::NotFound)
    );
    assert_eq!(MainRoute::iter().count(), 2);
}

/// Tests that switching threads keeps the sidebar state
#[test]
fn test_with_thread_keeps_history_flag() {
    let query = ThreadQuery::default().with_history_open(true);
    let switched = query.with_thread(Some("t-1".into()));
    assert_eq!(switched.thread_id.as_deref(), Some("t-1"));
    assert!(switched.history_open());

    let cleared = switched.with_thread(None);
    assert_eq!(cleared.thread_id, None);
    assert!(cleared.history_open());
}

/// Tests that a closed sidebar is dropped from the query string
#[test]
fn test_closed_history_is_omitted() {
    let query = ThreadQuery {
        thread_id: Some("t-1".into()),
        chat_history_open: Some(true),
    }
    .with_history_open(false);
    assert_eq!(query.chat_history_open, None);
    assert!(!query.history_open());

    let encoded = serde_json::to_value(&query).unwrap();
    assert_eq!(encoded, serde_json::json!({ "threadId": "t-1" }));
}

/// Tests query field names
#[test]
fn test_query_field_names() {
    let query: ThreadQuery =
        serde_json::from_value(serde_json::json!({ "threadId": "t-9", "chatHistoryOpen": true }))
            .unwrap();
    assert_eq!(query.thread_id.as_deref(), Some("t-9"));
    assert!(query.history_open());
}
