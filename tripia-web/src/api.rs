use std::ops::ControlFlow;

use futures_util::StreamExt;
use once_cell::unsync::OnceCell;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tripia_shared::models::{ErrorResponse, RunRequest, Thread, ThreadState};
use tripia_shared::sse::{RunEvent, SseDecoder};
use uuid::Uuid;

use crate::config::FrontendConfig;

const API_KEY_HEADER: &str = "X-Api-Key";

thread_local! {
    static SHARED_CLIENT: OnceCell<TripIaClient> = const { OnceCell::new() };
}

/// Failure talking to the agent server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport or decoding failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{message} ({status})")]
    Status {
        /// HTTP status returned.
        status: StatusCode,
        /// Server message, or the status reason.
        message: String,
    },
}

/// Client for the LangGraph-compatible agent server.
#[derive(Clone, Debug)]
pub struct TripIaClient {
    base_url: String,
    assistant_id: String,
    api_key: Option<String>,
    client: Client,
}

impl TripIaClient {
    /// Create a client from the given configuration.
    pub fn new(config: &FrontendConfig) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            assistant_id: config.assistant_id.clone(),
            api_key: config.api_key.clone(),
            client: Client::new(),
        }
    }

    /// Per-thread client built from the compile-time configuration.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(&FrontendConfig::default()))
                .clone()
        })
    }

    /// Assistant id runs are started on.
    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let request = self.client.post(self.api_url(path));
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// Metadata that scopes threads to the configured graph. A UUID names
    /// an assistant, anything else a graph.
    fn thread_metadata(&self) -> Value {
        if Uuid::parse_str(&self.assistant_id).is_ok() {
            json!({ "assistant_id": self.assistant_id })
        } else {
            json!({ "graph_id": self.assistant_id })
        }
    }

    /// Threads of the configured graph, most recently updated first.
    pub async fn search_threads(&self, limit: usize) -> Result<Vec<Thread>, ApiError> {
        let body = json!({
            "metadata": self.thread_metadata(),
            "limit": limit,
            "offset": 0,
        });
        let response = self.post("threads/search").json(&body).send().await?;
        read_json(response).await
    }

    /// Creates an empty thread.
    pub async fn create_thread(&self) -> Result<Thread, ApiError> {
        let body = json!({ "metadata": self.thread_metadata() });
        let response = self.post("threads").json(&body).send().await?;
        read_json(response).await
    }

    /// Checkpoint history of a thread, newest first.
    pub async fn thread_history(
        &self,
        thread_id: &str,
        limit: usize,
    ) -> Result<Vec<ThreadState>, ApiError> {
        let body = json!({ "limit": limit });
        let response = self
            .post(&format!("threads/{thread_id}/history"))
            .json(&body)
            .send()
            .await?;
        read_json(response).await
    }

    /// Starts a run and feeds every stream event to `on_event` until the
    /// stream ends or `on_event` breaks.
    pub async fn stream_run<F>(
        &self,
        thread_id: &str,
        request: &RunRequest,
        mut on_event: F,
    ) -> Result<(), ApiError>
    where
        F: FnMut(RunEvent) -> ControlFlow<()>,
    {
        let response = self
            .post(&format!("threads/{thread_id}/runs/stream"))
            .header("Accept", "text/event-stream")
            .json(request)
            .send()
            .await?;
        let response = check_status(response).await?;

        let mut decoder = SseDecoder::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            for frame in decoder.push(&chunk?) {
                if on_event(RunEvent::from_frame(&frame)).is_break() {
                    return Ok(());
                }
            }
        }
        if let Some(frame) = decoder.finish() {
            let _ = on_event(RunEvent::from_frame(&frame));
        }
        Ok(())
    }

    /// Asks the server to stop a run.
    pub async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<(), ApiError> {
        let response = self
            .post(&format!("threads/{thread_id}/runs/{run_id}/cancel"))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(status, &body),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(check_status(response).await?.json().await?)
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.message)
        .ok()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
