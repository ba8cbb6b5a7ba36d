//! Ask and configuration error types.

use thiserror::Error;

/// Prefix for every failure shown to the user.
pub const ERROR_PREFIX: &str = "Error: ";

/// Errors from one submission cycle.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("empty prompt")]
    EmptyQuery,
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors while resolving the endpoint.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// The text displayed for a failed submission: "Error: " followed by the message.
pub fn display_error(err: &AskError) -> String {
    format!("{}{}", ERROR_PREFIX, err)
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies may carry `message`, `error` or `messages` (a string or a list of
/// strings); anything else is used as plain text. Empty bodies yield `None`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error", "messages"] {
            let Some(v) = json.get(key) else { continue };
            if let Some(s) = v.as_str() {
                return Some(s.to_string());
            }
            if let Some(s) = v
                .as_array()
                .and_then(|a| a.iter().find_map(|item| item.as_str()))
            {
                return Some(s.to_string());
            }
            if let Some(s) = v.get("message").and_then(|m| m.as_str()) {
                return Some(s.to_string());
            }
        }
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_error_has_prefix() {
        let err = AskError::Status {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        let shown = display_error(&err);
        assert!(shown.starts_with("Error: "));
        assert_eq!(shown, "Error: HTTP 502: Bad Gateway");
    }

    #[test]
    fn display_error_empty_query() {
        assert_eq!(display_error(&AskError::EmptyQuery), "Error: empty prompt");
    }

    #[test]
    fn decode_error_message() {
        let e = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let shown = display_error(&AskError::from(e));
        assert!(shown.starts_with("Error: invalid response: "));
    }

    #[test]
    fn extract_message_field() {
        assert_eq!(
            extract_error_message(r#"{"message":"Chat messages are required."}"#),
            Some("Chat messages are required.".to_string())
        );
    }

    #[test]
    fn extract_messages_list() {
        assert_eq!(
            extract_error_message(r#"{"messages":["Error in fetching chat response."]}"#),
            Some("Error in fetching chat response.".to_string())
        );
    }

    #[test]
    fn extract_nested_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"Rate limit exceeded"}}"#),
            Some("Rate limit exceeded".to_string())
        );
    }

    #[test]
    fn extract_plain_text() {
        assert_eq!(
            extract_error_message("  upstream timed out \n"),
            Some("upstream timed out".to_string())
        );
    }

    #[test]
    fn extract_empty_body() {
        assert_eq!(extract_error_message("   "), None);
    }

    #[test]
    fn extract_json_without_known_keys_uses_body() {
        assert_eq!(
            extract_error_message(r#"{"code":7}"#),
            Some(r#"{"code":7}"#.to_string())
        );
    }
}
