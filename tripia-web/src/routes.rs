use serde::{Deserialize, Serialize};
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::diagnostics;
use crate::pages::{NotFoundPage, ThreadPage};

/// The app routes.
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Query-string state of the thread page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadQuery {
    /// Thread being shown; absent before the first submission.
    #[serde(rename = "threadId", default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Whether the history sidebar is open.
    #[serde(
        rename = "chatHistoryOpen",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub chat_history_open: Option<bool>,
}

impl ThreadQuery {
    /// Returns a copy pointing at `thread_id`.
    #[must_use]
    pub fn with_thread(&self, thread_id: Option<String>) -> Self {
        Self {
            thread_id,
            ..self.clone()
        }
    }

    /// Returns a copy with the sidebar `open` or closed.
    #[must_use]
    pub fn with_history_open(&self, open: bool) -> Self {
        Self {
            chat_history_open: open.then_some(true),
            ..self.clone()
        }
    }

    /// Whether the sidebar is open.
    pub fn history_open(&self) -> bool {
        self.chat_history_open.unwrap_or(false)
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    diagnostics::info(&format!("Switching to route: {route:?}"));
    match route {
        MainRoute::Home => html! { <ThreadPage /> },
        MainRoute::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
