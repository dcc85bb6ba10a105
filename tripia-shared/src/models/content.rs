//! Message content handling.
//!
//! Agent messages carry their content either as a plain string or as an
//! ordered list of typed blocks (`{"type": "text", "text": ...}`,
//! `{"type": "image", ...}`, ...). Content arrives from a separate process, so
//! it is kept as raw JSON and interpreted defensively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Placeholder returned for null, missing or empty content.
pub const EMPTY_MESSAGE: &str = "Empty message";
/// Placeholder returned when content is neither a string nor a block list.
pub const INVALID_FORMAT: &str = "Invalid message format";
/// Placeholder returned when no block yields a usable label.
pub const MULTIMODAL_MESSAGE: &str = "Multimodal message";

/// MIME types accepted as message attachments.
pub const SUPPORTED_FILE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];

/// Returns `true` when `mime_type` can be attached to a message.
pub fn is_supported_file_type(mime_type: &str) -> bool {
    SUPPORTED_FILE_TYPES.contains(&mime_type)
}

/// Converts a message content union into a single display string.
///
/// The function is total: every JSON shape maps to a string.
///
/// * falsy content yields [`EMPTY_MESSAGE`];
/// * a string is returned verbatim;
/// * anything that is not an array yields [`INVALID_FORMAT`];
/// * text blocks are joined with a single space, in order;
/// * without text blocks, the first typed non-text block yields a label such
///   as `"[Image content]"`, otherwise [`MULTIMODAL_MESSAGE`].
pub fn content_string(content: &Value) -> String {
    if is_falsy(content) {
        return EMPTY_MESSAGE.to_string();
    }

    let blocks = match content {
        Value::String(text) => return text.clone(),
        Value::Array(blocks) => blocks,
        _ => return INVALID_FORMAT.to_string(),
    };

    let texts: Vec<&str> = blocks.iter().filter_map(text_of_block).collect();
    if !texts.is_empty() {
        return texts.join(" ");
    }

    blocks
        .iter()
        .filter_map(Value::as_object)
        .find(|block| block.get("type").and_then(Value::as_str) != Some("text"))
        .and_then(|block| block.get("type").and_then(Value::as_str))
        .filter(|kind| !kind.is_empty())
        .map_or_else(
            || MULTIMODAL_MESSAGE.to_string(),
            |kind| format!("[{} content]", capitalize(kind)),
        )
}

pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0 || n.is_nan()),
        _ => false,
    }
}

fn text_of_block(block: &Value) -> Option<&str> {
    let block = block.as_object()?;
    if block.get("type").and_then(Value::as_str) != Some("text") {
        return None;
    }
    block.get("text").and_then(Value::as_str)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// A typed content block used when building outgoing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Plain text.
    Text {
        /// Text payload.
        text: String,
    },
    /// Inline base64 image.
    Image {
        /// Always `"base64"` for attachments created by this client.
        source_type: String,
        /// MIME type of the encoded data.
        mime_type: String,
        /// Base64 payload.
        data: String,
        /// Free-form metadata, e.g. the original file name.
        #[serde(default)]
        metadata: Map<String, Value>,
    },
    /// Inline base64 document.
    File {
        /// Always `"base64"` for attachments created by this client.
        source_type: String,
        /// MIME type of the encoded data.
        mime_type: String,
        /// Base64 payload.
        data: String,
        /// Free-form metadata, e.g. the original file name.
        #[serde(default)]
        metadata: Map<String, Value>,
    },
}

impl ContentBlock {
    /// Creates a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an attachment block for a file already encoded as base64.
    ///
    /// Images become `image` blocks, everything else becomes a `file` block.
    pub fn attachment(mime_type: &str, data: String, file_name: &str) -> Self {
        if mime_type.starts_with("image/") {
            let mut metadata = Map::new();
            metadata.insert("name".into(), json!(file_name));
            Self::Image {
                source_type: "base64".into(),
                mime_type: mime_type.into(),
                data,
                metadata,
            }
        } else {
            let mut metadata = Map::new();
            metadata.insert("filename".into(), json!(file_name));
            Self::File {
                source_type: "base64".into(),
                mime_type: mime_type.into(),
                data,
                metadata,
            }
        }
    }

    /// Name shown in previews for attachment blocks.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::Image { metadata, .. } => metadata.get("name").and_then(Value::as_str),
            Self::File { metadata, .. } => metadata.get("filename").and_then(Value::as_str),
        }
    }

    /// Converts the block into its wire representation.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Returns the base64 attachment blocks found in `content`.
///
/// Blocks that do not parse as an attachment are skipped.
pub fn attachment_blocks(content: &Value) -> Vec<ContentBlock> {
    content
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter(|block| block.get("source_type").and_then(Value::as_str) == Some("base64"))
                .filter_map(|block| serde_json::from_value::<ContentBlock>(block.clone()).ok())
                .filter(|block| !matches!(block, ContentBlock::Text { .. }))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Value::Null ; "null")]
    #[test_case(json!("") ; "empty string")]
    #[test_case(json!(false) ; "false")]
    #[test_case(json!(0) ; "zero")]
    fn falsy_content_is_empty_message(content: Value) {
        assert_eq!(content_string(&content), EMPTY_MESSAGE);
    }

    #[test_case(json!(42) ; "number")]
    #[test_case(json!({"type": "text", "text": "hi"}) ; "bare object")]
    #[test_case(json!(true) ; "true")]
    fn non_array_content_is_invalid(content: Value) {
        assert_eq!(content_string(&content), INVALID_FORMAT);
    }

    #[test]
    fn string_content_is_returned_verbatim() {
        assert_eq!(content_string(&json!("  Olá  ")), "  Olá  ");
    }

    #[test]
    fn text_blocks_are_joined_with_spaces() {
        let content = json!([
            {"type": "text", "text": "Hello"},
            {"type": "text", "text": "World"}
        ]);
        assert_eq!(content_string(&content), "Hello World");
    }

    #[test]
    fn non_text_blocks_are_skipped_when_text_exists() {
        let content = json!([
            {"type": "image", "data": "..."},
            {"type": "text", "text": "caption"}
        ]);
        assert_eq!(content_string(&content), "caption");
    }

    #[test]
    fn image_only_content_is_labelled() {
        let content = json!([{"type": "image", "source_type": "base64", "data": "AAAA"}]);
        assert_eq!(content_string(&content), "[Image content]");
    }

    #[test]
    fn tool_use_only_content_is_labelled() {
        let content = json!([{"type": "tool_use", "id": "call_1"}]);
        assert_eq!(content_string(&content), "[Tool_use content]");
    }

    #[test]
    fn malformed_arrays_never_fail() {
        let cases = [
            json!([]),
            json!([1, "two", null, true]),
            json!([{"type": "text"}]),
            json!([{"type": "text", "text": 5}]),
            json!([{"no_type": 1}]),
            json!([{"type": ""}]),
        ];
        for content in cases {
            assert_eq!(content_string(&content), MULTIMODAL_MESSAGE, "{content}");
        }
    }

    #[test]
    fn attachment_uses_block_kind_by_mime_type() {
        let image = ContentBlock::attachment("image/png", "AAAA".into(), "map.png");
        let pdf = ContentBlock::attachment("application/pdf", "BBBB".into(), "ticket.pdf");

        assert_eq!(image.to_value()["type"], "image");
        assert_eq!(image.display_name(), Some("map.png"));
        assert_eq!(pdf.to_value()["type"], "file");
        assert_eq!(pdf.display_name(), Some("ticket.pdf"));
    }

    #[test]
    fn attachment_blocks_are_recovered_from_content() {
        let content = json!([
            {"type": "text", "text": "see attached"},
            ContentBlock::attachment("image/webp", "CCCC".into(), "hotel.webp").to_value(),
            {"type": "image", "url": "https://example.com/x.png"}
        ]);
        let blocks = attachment_blocks(&content);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].display_name(), Some("hotel.webp"));
    }

    #[test]
    fn supported_file_types_are_checked() {
        assert!(is_supported_file_type("image/gif"));
        assert!(is_supported_file_type("application/pdf"));
        assert!(!is_supported_file_type("text/html"));
    }
}
