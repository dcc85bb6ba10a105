//! Wire models of the agent server's thread API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::{content_string, is_falsy};
use super::message::Message;

/// A persisted conversation as listed by `POST /threads/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// Opaque thread identifier.
    pub thread_id: String,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Arbitrary metadata, e.g. `graph_id`.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Thread status (`idle`, `busy`, `interrupted`, `error`).
    #[serde(default)]
    pub status: Option<String>,
    /// Latest state values; left raw because graphs may store anything here.
    #[serde(default)]
    pub values: Value,
}

/// Label shown for a thread in the history list.
///
/// Uses the first message's content string, falling back to the thread id
/// when there is no message or its content is empty.
pub fn thread_label(thread: &Thread) -> String {
    thread
        .values
        .get("messages")
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
        .and_then(|first| first.get("content"))
        .filter(|content| !is_falsy(content))
        .map(content_string)
        .unwrap_or_else(|| thread.thread_id.clone())
}

/// Reference to a point in a thread's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint identifier.
    pub checkpoint_id: String,
    /// Namespace; empty for the root graph.
    #[serde(default)]
    pub checkpoint_ns: String,
    /// Owning thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Fields passed back to the server untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A paused state waiting for user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interrupt {
    /// Payload describing what the agent needs.
    #[serde(default)]
    pub value: Value,
    /// Whether the graph can resume from this interrupt.
    #[serde(default)]
    pub resumable: Option<bool>,
    /// Interrupt namespace path.
    #[serde(default)]
    pub ns: Option<Vec<String>>,
    /// `"during"` or `"after"`.
    #[serde(default)]
    pub when: Option<String>,
}

/// State values streamed for a thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadValues {
    /// Ordered message list.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Agent-supplied UI descriptors, kept raw for the defensive loader.
    #[serde(default)]
    pub ui: Vec<Value>,
    /// Pending interrupts.
    #[serde(default, rename = "__interrupt__")]
    pub interrupts: Vec<Interrupt>,
}

impl ThreadValues {
    /// Reads values leniently: a malformed `ui` or interrupt list never
    /// discards the messages.
    pub fn from_value(value: &Value) -> Self {
        let messages = value
            .get("messages")
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|message| {
                        serde_json::from_value::<Message>(message.clone())
                            .map_err(|error| {
                                tracing::debug!(%error, "skipping unreadable message");
                            })
                            .ok()
                    })
                    .collect()
            })
            .unwrap_or_default();
        let ui = value
            .get("ui")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let interrupts = value
            .get("__interrupt__")
            .cloned()
            .and_then(|raw| serde_json::from_value(raw).ok())
            .unwrap_or_default();
        Self {
            messages,
            ui,
            interrupts,
        }
    }

    /// Returns `true` when any message came from the assistant or a tool.
    pub fn has_agent_output(&self) -> bool {
        self.messages.iter().any(Message::is_agent_output)
    }
}

/// One entry of `POST /threads/{id}/history`, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadState {
    /// State values at this checkpoint.
    #[serde(default)]
    pub values: Value,
    /// Nodes scheduled to run next.
    #[serde(default)]
    pub next: Vec<String>,
    /// This state's checkpoint.
    pub checkpoint: Checkpoint,
    /// Checkpoint this state was derived from.
    #[serde(default)]
    pub parent_checkpoint: Option<Checkpoint>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Checkpoint metadata.
    #[serde(default)]
    pub metadata: Value,
}

impl ThreadState {
    /// Ids of the messages present in this state, in order.
    pub fn message_ids(&self) -> Vec<&str> {
        self.values
            .get("messages")
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|message| message.get("id").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parsed values of this state.
    pub fn thread_values(&self) -> ThreadValues {
        ThreadValues::from_value(&self.values)
    }
}

/// Stream modes requested from the run endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    /// Full state after every step.
    Values,
    /// Per-node state deltas.
    Updates,
    /// Custom events emitted by the graph.
    Custom,
}

/// Input of a run: new messages plus the context object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInput {
    /// Messages appended to the thread; omitted for regeneration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// Context carrying at least `language`.
    #[serde(default)]
    pub context: Map<String, Value>,
}

/// Body of `POST /threads/{id}/runs/stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Graph or assistant to run.
    pub assistant_id: String,
    /// Run input; `None` resumes or regenerates from the checkpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<RunInput>,
    /// Resume command for interrupted runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Value>,
    /// Checkpoint to fork from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<Checkpoint>,
    /// Requested stream modes.
    pub stream_mode: Vec<StreamMode>,
    /// Include subgraph events.
    #[serde(default)]
    pub stream_subgraphs: bool,
    /// Allow the stream to be resumed after a disconnect.
    #[serde(default)]
    pub stream_resumable: bool,
}

impl RunRequest {
    /// A values-mode run for `assistant_id`.
    pub fn values(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            input: None,
            command: None,
            checkpoint: None,
            stream_mode: vec![StreamMode::Values],
            stream_subgraphs: true,
            stream_resumable: true,
        }
    }

    /// Sets the run input.
    #[must_use]
    pub fn with_input(mut self, input: RunInput) -> Self {
        self.input = Some(input);
        self
    }

    /// Forks from `checkpoint` when present.
    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: Option<Checkpoint>) -> Self {
        self.checkpoint = checkpoint;
        self
    }

    /// Resumes an interrupt with `resume`.
    #[must_use]
    pub fn with_resume(mut self, resume: Value) -> Self {
        self.command = Some(serde_json::json!({ "resume": resume }));
        self
    }
}
