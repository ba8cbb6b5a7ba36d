//! Wire types for the chat endpoint and extraction of the displayed content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::normalize::normalize_value;

/// Shown when the response carries no message content at all.
pub const NO_RESPONSE: &str = "No response.";

/// A role/content pair sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body: always a single user message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn for_query(query: &str) -> Self {
        Self {
            messages: vec![ChatMessage::user(query)],
        }
    }
}

/// One message in the response. The backend also sends id, role, timestamp and
/// tool call bookkeeping; only the content is displayed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Value,
}

/// Response body: `{"messages": [{"content": "..."}, ...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub messages: Option<Vec<ResponseMessage>>,
}

/// Text contributed by one content value once normalized.
fn content_text(content: Value) -> String {
    match normalize_value(content) {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ChatResponse {
    /// Newline-joined message contents, or [`NO_RESPONSE`] when there is nothing to show.
    pub fn display_text(self) -> String {
        let Some(messages) = self.messages else {
            return NO_RESPONSE.to_string();
        };
        let joined = messages
            .into_iter()
            .map(|m| content_text(m.content))
            .collect::<Vec<_>>()
            .join("\n");
        if joined.is_empty() {
            NO_RESPONSE.to_string()
        } else {
            joined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ChatResponse {
        serde_json::from_str(body).expect("valid response json")
    }

    #[test]
    fn request_has_single_user_message() {
        let body = serde_json::to_value(ChatRequest::for_query("total revenue 2024?")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "messages": [{"role": "user", "content": "total revenue 2024?"}]
            })
        );
    }

    #[test]
    fn display_text_joins_contents() {
        let resp = parse(r#"{"messages":[{"content":"first"},{"content":"second"}]}"#);
        assert_eq!(resp.display_text(), "first\nsecond");
    }

    #[test]
    fn display_text_normalizes_each_content() {
        let resp = parse(r###"{"messages":[{"content":"\"## Title\\nbody\""}]}"###);
        assert_eq!(resp.display_text(), "## Title\nbody");
    }

    #[test]
    fn display_text_ignores_backend_bookkeeping() {
        let resp = parse(
            r#"{"messages":[
                {"role":"user","content":"q"},
                {"id":"a1","role":"assistant","content":null,"finish_reason":"tool_calls",
                 "tool_calls":[{"id":"t1","type":"function"}]},
                {"role":"tool","tool_call_id":"t1","content":"| a |\n|---|\n| 1 |"}
            ]}"#,
        );
        assert_eq!(resp.display_text(), "q\n\n| a |\n|---|\n| 1 |");
    }

    #[test]
    fn display_text_non_string_content_as_json() {
        let resp = parse(r#"{"messages":[{"content":{"rows":2}}]}"#);
        assert_eq!(resp.display_text(), r#"{"rows":2}"#);
    }

    #[test]
    fn missing_messages_falls_back() {
        assert_eq!(parse("{}").display_text(), NO_RESPONSE);
        assert_eq!(parse(r#"{"messages":null}"#).display_text(), NO_RESPONSE);
    }

    #[test]
    fn empty_messages_falls_back() {
        assert_eq!(parse(r#"{"messages":[]}"#).display_text(), NO_RESPONSE);
        assert_eq!(
            parse(r#"{"messages":[{"content":""}]}"#).display_text(),
            NO_RESPONSE
        );
        assert_eq!(
            parse(r#"{"messages":[{"role":"assistant"}]}"#).display_text(),
            NO_RESPONSE
        );
    }
}
