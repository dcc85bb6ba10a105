//! Message construction and interpretation helpers for agent runs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::models::content::ContentBlock;
use crate::models::language::Language;
use crate::models::message::{DO_NOT_RENDER_ID_PREFIX, Message, MessageType, ToolCall};

/// Content of the synthetic tool result answering a dangling tool call.
pub const TOOL_CALL_FILLER: &str = "Successfully handled tool call.";

/// Returns filler tool messages for every AI tool call that is not directly
/// followed by a tool result.
///
/// The server rejects a new human turn while tool calls are unanswered, so
/// these are sent (hidden) ahead of the human message.
pub fn ensure_tool_calls_have_responses(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .enumerate()
        .filter(|(_, message)| message.kind == MessageType::Ai && !message.tool_calls.is_empty())
        .filter(|(index, _)| {
            messages
                .get(index + 1)
                .is_none_or(|next| next.kind != MessageType::Tool)
        })
        .flat_map(|(_, message)| message.tool_calls.iter())
        .map(|call| {
            Message::tool(
                format!("{DO_NOT_RENDER_ID_PREFIX}{}", uuid::Uuid::new_v4()),
                call.id.clone().unwrap_or_default(),
                call.name.clone(),
                TOOL_CALL_FILLER,
            )
        })
        .collect()
}

/// Builds the outgoing human message from the composer input.
///
/// Returns `None` when the trimmed text is empty and nothing is attached.
pub fn build_human_message(input: &str, attachments: &[ContentBlock]) -> Option<Message> {
    let text = input.trim();
    if text.is_empty() && attachments.is_empty() {
        return None;
    }
    let mut blocks = Vec::with_capacity(attachments.len() + 1);
    if !text.is_empty() {
        blocks.push(ContentBlock::text(text));
    }
    blocks.extend(attachments.iter().cloned());
    Some(Message::human(blocks))
}

/// The `context` object sent with every run.
///
/// Extra entries (such as artifact context) are kept, `language` always
/// reflects the active language.
pub fn submission_context(language: Language, extra: &Map<String, Value>) -> Map<String, Value> {
    let mut context = extra.clone();
    context.insert("language".into(), json!(language.code()));
    context
}

/// Messages shown while a new submission is in flight.
pub fn optimistic_messages(current: &[Message], outgoing: &[Message]) -> Vec<Message> {
    current.iter().chain(outgoing).cloned().collect()
}

/// Messages shown while an edited human message is resubmitted: everything
/// before the edited message, then its replacement.
pub fn edited_messages(current: &[Message], edited_id: &str, replacement: Message) -> Vec<Message> {
    let keep = current
        .iter()
        .position(|message| message.has_id(edited_id))
        .unwrap_or(current.len());
    let mut messages = current[..keep].to_vec();
    messages.push(replacement);
    messages
}

/// Parses a JSON prefix produced by a model that is still streaming.
///
/// Unterminated strings and containers are closed; a dangling key or
/// separator is dropped. Returns `None` when no prefix parses.
pub fn parse_partial_json(input: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(input) {
        return Some(value);
    }
    let ends = input
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(input.len()))
        .rev();
    for end in ends {
        let candidate = close_json(&input[..end]);
        if candidate.trim().is_empty() {
            continue;
        }
        if let Ok(value) = serde_json::from_str(&candidate) {
            return Some(value);
        }
    }
    None
}

fn close_json(prefix: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for ch in prefix.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                stack.pop();
            }
            _ => {}
        }
    }
    let mut closed = prefix.to_string();
    if in_string {
        if escaped {
            closed.pop();
        }
        closed.push('"');
    }
    closed.extend(stack.iter().rev());
    closed
}

/// Tool calls carried as streamed `tool_use` content blocks.
pub fn streamed_tool_calls(content: &Value) -> Vec<ToolCall> {
    let Some(blocks) = content.as_array() else {
        return Vec::new();
    };
    blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("tool_use"))
        .filter(|block| block.get("id").is_some_and(|id| !id.is_null()))
        .map(|block| {
            let args = match block.get("input") {
                Some(Value::String(raw)) => parse_partial_json(raw)
                    .filter(Value::is_object)
                    .unwrap_or_else(|| json!({})),
                Some(object @ Value::Object(_)) => object.clone(),
                _ => json!({}),
            };
            ToolCall {
                name: block
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                args,
                id: block.get("id").and_then(Value::as_str).map(str::to_string),
                kind: Some("tool_call".into()),
            }
        })
        .collect()
}

/// Tool calls to display for an AI message.
///
/// Calls with arguments win, then streamed `tool_use` blocks, then bare calls.
pub fn display_tool_calls(message: &Message) -> Vec<ToolCall> {
    if message.tool_calls.iter().any(ToolCall::has_args) {
        return message.tool_calls.clone();
    }
    let streamed = streamed_tool_calls(&message.content);
    if streamed.is_empty() {
        message.tool_calls.clone()
    } else {
        streamed
    }
}

/// Permissions attached to an agent-inbox interrupt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct InboxConfig {
    /// Free-text response allowed.
    pub allow_respond: bool,
    /// Accepting the action as is allowed.
    pub allow_accept: bool,
    /// Editing the action arguments allowed.
    pub allow_edit: bool,
    /// Ignoring the action allowed.
    pub allow_ignore: bool,
}

/// The action awaiting approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Action or tool name.
    pub action: String,
    /// Proposed arguments.
    #[serde(default)]
    pub args: Value,
}

/// An interrupt asking a human to review an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxRequest {
    /// The action under review.
    pub action_request: ActionRequest,
    /// What the reviewer may do.
    pub config: InboxConfig,
    /// Optional explanation shown to the reviewer.
    #[serde(default)]
    pub description: Option<String>,
}

/// Reviewer decision sent back to resume the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "args", rename_all = "lowercase")]
pub enum InboxResponse {
    /// Run the action as proposed.
    Accept,
    /// Skip the action.
    Ignore,
    /// Answer with free text instead.
    Response(String),
    /// Run the action with edited arguments.
    Edit(ActionRequest),
}

/// Returns `true` when `value` (or its first element) has the agent-inbox
/// shape: an `action_request` object and a `config` with all four flags.
pub fn is_agent_inbox_interrupt(value: &Value) -> bool {
    let candidate = match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    let Some(object) = candidate.and_then(Value::as_object) else {
        return false;
    };
    let has_action = object.get("action_request").is_some_and(Value::is_object);
    let has_flags = object
        .get("config")
        .and_then(Value::as_object)
        .is_some_and(|config| {
            ["allow_respond", "allow_accept", "allow_edit", "allow_ignore"]
                .iter()
                .all(|flag| config.contains_key(*flag))
        });
    has_action && has_flags
}

/// Parses the inbox requests of an interrupt value.
pub fn inbox_requests(value: &Value) -> Vec<InboxRequest> {
    if !is_agent_inbox_interrupt(value) {
        return Vec::new();
    }
    let items = match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(value: Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    fn ai_with_calls(id: &str) -> Message {
        message(json!({
            "id": id,
            "type": "ai",
            "content": "",
            "tool_calls": [
                {"name": "search_flights", "args": {"from": "GRU"}, "id": "call_1"},
                {"name": "search_hotels", "args": {}, "id": "call_2"}
            ]
        }))
    }

    #[test]
    fn unanswered_tool_calls_get_one_filler_each() {
        let messages = vec![
            message(json!({"id": "h1", "type": "human", "content": "hi"})),
            ai_with_calls("a1"),
        ];

        let fillers = ensure_tool_calls_have_responses(&messages);

        assert_eq!(fillers.len(), 2);
        assert!(fillers.iter().all(Message::is_hidden));
        assert_eq!(fillers[0].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(fillers[1].name.as_deref(), Some("search_hotels"));
        assert_eq!(fillers[0].text(), TOOL_CALL_FILLER);
    }

    #[test]
    fn answered_tool_calls_need_no_filler() {
        let messages = vec![
            ai_with_calls("a1"),
            message(json!({"id": "t1", "type": "tool", "content": "[]", "tool_call_id": "call_1"})),
            message(json!({"id": "a2", "type": "ai", "content": "done"})),
        ];
        assert!(ensure_tool_calls_have_responses(&messages).is_empty());
    }

    #[test]
    fn human_message_uses_trimmed_text_then_attachments() {
        let pdf = ContentBlock::attachment("application/pdf", "AAAA".into(), "ticket.pdf");
        let message = build_human_message("  Rio in June  ", std::slice::from_ref(&pdf)).unwrap();

        assert_eq!(message.kind, MessageType::Human);
        assert!(message.id.is_some());
        assert_eq!(message.content[0], json!({"type": "text", "text": "Rio in June"}));
        assert_eq!(message.content[1], pdf.to_value());
    }

    #[test]
    fn blank_input_without_attachments_is_ignored() {
        assert!(build_human_message("   \n", &[]).is_none());
        let image = ContentBlock::attachment("image/png", "AAAA".into(), "map.png");
        let message = build_human_message("", &[image]).unwrap();
        assert_eq!(message.content.as_array().unwrap().len(), 1);
    }

    #[test]
    fn context_always_carries_the_language() {
        let mut extra = Map::new();
        extra.insert("language".into(), json!("fr"));
        extra.insert("selected_flight".into(), json!("TP123"));

        let context = submission_context(Language::PtBr, &extra);

        assert_eq!(context["language"], "pt-BR");
        assert_eq!(context["selected_flight"], "TP123");
    }

    #[test]
    fn optimistic_list_appends_in_order() {
        let current = vec![ai_with_calls("a1")];
        let fillers = ensure_tool_calls_have_responses(&current);
        let human = build_human_message("next", &[]).unwrap();
        let outgoing: Vec<_> = fillers.iter().cloned().chain([human.clone()]).collect();

        let messages = optimistic_messages(&current, &outgoing);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages.last(), Some(&human));
    }

    #[test]
    fn edit_truncates_at_the_edited_message() {
        let current = vec![
            message(json!({"id": "h1", "type": "human", "content": "one"})),
            message(json!({"id": "a1", "type": "ai", "content": "two"})),
            message(json!({"id": "h2", "type": "human", "content": "three"})),
            message(json!({"id": "a2", "type": "ai", "content": "four"})),
        ];
        let replacement = build_human_message("three, edited", &[]).unwrap();

        let messages = edited_messages(&current, "h2", replacement.clone());

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2], replacement);
    }

    #[test]
    fn partial_json_is_recovered() {
        assert_eq!(
            parse_partial_json(r#"{"origin": "GRU", "destination": "LI"#),
            Some(json!({"origin": "GRU", "destination": "LI"}))
        );
        assert_eq!(
            parse_partial_json(r#"{"legs": [{"from": "GRU"}, {"fr"#),
            Some(json!({"legs": [{"from": "GRU"}, {}]}))
        );
        assert_eq!(parse_partial_json(r#"{"a": 1, "#), Some(json!({"a": 1})));
        assert_eq!(parse_partial_json(r#"{"note": "ends with \"#), Some(json!({"note": "ends with "})));
        assert_eq!(parse_partial_json(""), None);
    }

    #[test]
    fn streamed_tool_use_blocks_become_tool_calls() {
        let ai = message(json!({
            "id": "a1",
            "type": "ai",
            "content": [
                {"type": "text", "text": "Searching"},
                {"type": "tool_use", "id": "toolu_1", "name": "search_flights", "input": "{\"from\": \"GR"},
                {"type": "tool_use", "name": "no_id"}
            ]
        }));

        let calls = display_tool_calls(&ai);

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, json!({"from": "GR"}));
        assert_eq!(calls[0].id.as_deref(), Some("toolu_1"));
    }

    #[test]
    fn tool_calls_with_args_take_precedence() {
        let ai = ai_with_calls("a1");
        assert_eq!(display_tool_calls(&ai).len(), 2);
    }

    #[test]
    fn agent_inbox_shape_is_detected() {
        let inbox = json!([{
            "action_request": {"action": "book_flight", "args": {"flight": "TP123"}},
            "config": {"allow_respond": true, "allow_accept": true, "allow_edit": false, "allow_ignore": true},
            "description": "Confirm booking"
        }]);
        assert!(is_agent_inbox_interrupt(&inbox));
        let requests = inbox_requests(&inbox);
        assert_eq!(requests[0].action_request.action, "book_flight");
        assert!(!requests[0].config.allow_edit);

        assert!(!is_agent_inbox_interrupt(&json!({"question": "Which date?"})));
        assert!(!is_agent_inbox_interrupt(&json!([])));
        assert!(!is_agent_inbox_interrupt(&json!({"action_request": {}, "config": {"allow_accept": true}})));
    }

    #[test]
    fn inbox_responses_serialize_as_tagged_objects() {
        assert_eq!(
            serde_json::to_value(InboxResponse::Accept).unwrap(),
            json!({"type": "accept"})
        );
        assert_eq!(
            serde_json::to_value(InboxResponse::Response("Use the morning flight".into())).unwrap(),
            json!({"type": "response", "args": "Use the morning flight"})
        );
    }
}
