use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::content::{ContentBlock, content_string};

/// Prefix for message ids that are sent to the agent but never rendered.
pub const DO_NOT_RENDER_ID_PREFIX: &str = "do-not-render:";

/// The author kind of a message in a thread.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Message written by the user.
    Human,
    /// Message produced by the assistant model.
    Ai,
    /// Result of a tool invocation.
    Tool,
    /// System prompt or notice.
    System,
    /// Any type this client does not know how to render.
    #[serde(other)]
    Unknown,
}

impl Display for MessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MessageType::Human => write!(f, "human"),
            MessageType::Ai => write!(f, "ai"),
            MessageType::Tool => write!(f, "tool"),
            MessageType::System => write!(f, "system"),
            MessageType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A tool invocation requested by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Tool name.
    #[serde(default)]
    pub name: String,
    /// Arguments object.
    #[serde(default)]
    pub args: Value,
    /// Call identifier that tool results refer back to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Wire discriminator, `"tool_call"` when present.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ToolCall {
    /// Returns `true` when the call carries a non-empty argument object.
    pub fn has_args(&self) -> bool {
        match &self.args {
            Value::Object(map) => !map.is_empty(),
            Value::Null => false,
            _ => true,
        }
    }
}

/// A single message of a thread as exchanged with the agent server.
///
/// `content` stays raw JSON: it may be a string, a list of blocks or
/// anything else a misbehaving producer emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message identifier; absent on some server-generated messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Author kind.
    #[serde(rename = "type")]
    pub kind: MessageType,
    /// Content union.
    #[serde(default)]
    pub content: Value,
    /// Tool calls requested by an AI message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Call id answered by a tool message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Tool name for tool messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fields this client passes through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Creates a human message with a fresh random id.
    pub fn human(blocks: Vec<ContentBlock>) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            kind: MessageType::Human,
            content: Value::Array(blocks.iter().map(ContentBlock::to_value).collect()),
            tool_calls: Vec::new(),
            tool_call_id: None,
            name: None,
            extra: Map::new(),
        }
    }

    /// Creates a tool result message.
    pub fn tool(id: String, tool_call_id: String, name: String, content: &str) -> Self {
        Self {
            id: Some(id),
            kind: MessageType::Tool,
            content: Value::String(content.to_string()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id),
            name: Some(name),
            extra: Map::new(),
        }
    }

    /// Display string of the message content.
    pub fn text(&self) -> String {
        content_string(&self.content)
    }

    /// Returns `true` when the message should be hidden from the thread.
    pub fn is_hidden(&self) -> bool {
        self.id
            .as_deref()
            .is_some_and(|id| id.starts_with(DO_NOT_RENDER_ID_PREFIX))
    }

    /// Returns `true` for assistant and tool messages.
    pub fn is_agent_output(&self) -> bool {
        matches!(self.kind, MessageType::Ai | MessageType::Tool)
    }

    /// Returns `true` when `id` matches this message's id.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn human_message_has_unique_id_and_block_content() {
        let first = Message::human(vec![ContentBlock::text("Lisbon in May?")]);
        let second = Message::human(vec![ContentBlock::text("Lisbon in May?")]);

        assert_eq!(first.kind, MessageType::Human);
        assert_ne!(first.id, second.id);
        assert_eq!(first.content, json!([{"type": "text", "text": "Lisbon in May?"}]));
    }

    #[test]
    fn serialized_message_uses_wire_names() {
        let message = Message::human(vec![ContentBlock::text("hi")]);
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "human");
        assert!(value.get("tool_calls").is_none());
        assert!(value.get("name").is_none());
    }

    #[test]
    fn unknown_types_and_extra_fields_survive_deserialization() {
        let message: Message = serde_json::from_value(json!({
            "id": "m1",
            "type": "remove",
            "content": null,
            "response_metadata": {"model": "x"}
        }))
        .unwrap();

        assert_eq!(message.kind, MessageType::Unknown);
        assert_eq!(message.text(), "Empty message");
        assert_eq!(message.extra["response_metadata"]["model"], "x");
    }

    #[test]
    fn ai_message_with_tool_calls_parses() {
        let message: Message = serde_json::from_value(json!({
            "id": "ai-1",
            "type": "ai",
            "content": "",
            "tool_calls": [{"name": "search_flights", "args": {"from": "GRU"}, "id": "call_1", "type": "tool_call"}]
        }))
        .unwrap();

        assert_eq!(message.tool_calls.len(), 1);
        assert!(message.tool_calls[0].has_args());
        assert!(message.is_agent_output());
    }

    #[test]
    fn hidden_messages_use_the_reserved_prefix() {
        let hidden = Message::tool(
            format!("{DO_NOT_RENDER_ID_PREFIX}abc"),
            "call_1".into(),
            "search".into(),
            "ok",
        );
        let visible = Message::human(vec![ContentBlock::text("hi")]);

        assert!(hidden.is_hidden());
        assert!(!visible.is_hidden());
    }
}
