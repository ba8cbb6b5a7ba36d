//! HTTP client for the chat endpoint: one POST per submission.

use reqwest::Url;
use reqwest::header::ACCEPT;
use uuid::Uuid;

use crate::core::app;
use crate::core::config::Config;
use crate::core::error::{AskError, extract_error_message};
use crate::core::message::{ChatRequest, ChatResponse};

/// Header carrying a per-request id, for correlating with backend logs.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Posts questions to the configured chat endpoint.
#[derive(Debug, Clone)]
pub struct AskClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AskClient {
    pub fn new(config: &Config) -> Result<Self, AskError> {
        let http = reqwest::Client::builder()
            .user_agent(app::user_agent())
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `query` as a single user message and return the text to display.
    ///
    /// No retries and no timeout: the call resolves when the server answers or
    /// the connection fails.
    pub async fn ask(&self, query: &str) -> Result<String, AskError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AskError::EmptyQuery);
        }

        let request_id = Uuid::new_v4().to_string();
        log::info!("POST {} (request {})", self.endpoint, request_id);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .json(&ChatRequest::for_query(query))
            .send()
            .await
            .inspect_err(|e| log::warn!("request {} failed: {}", request_id, e))?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!(
            "request {}: HTTP {} ({} bytes)",
            request_id,
            status.as_u16(),
            body.len()
        );

        if !status.is_success() {
            let message = extract_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            log::warn!(
                "request {}: HTTP {}: {}",
                request_id,
                status.as_u16(),
                message
            );
            return Err(AskError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .inspect_err(|e| log::warn!("request {}: undecodable body: {}", request_id, e))?;
        Ok(parsed.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config;
    use crate::core::error::display_error;
    use crate::core::message::NO_RESPONSE;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// Serve one HTTP response on a random local port. Returns the base URL and a
    /// receiver for the raw request (headers + body).
    fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let request = read_request(&mut stream);
            let _ = tx.send(request);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        });
        (format!("http://{}", addr), rx)
    }

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).expect("read");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn client_for(base_url: &str) -> AskClient {
        let config = Config {
            endpoint: config::endpoint_url(base_url, "/threads/chat").unwrap(),
        };
        AskClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn ask_posts_single_user_message() {
        let (base, rx) = serve_once("200 OK", r#"{"messages":[{"content":"ok"}]}"#);
        let client = client_for(&base);

        let answer = client.ask("  How many customers?  ").await.unwrap();
        assert_eq!(answer, "ok");

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /threads/chat "));
        let lower = request.to_lowercase();
        assert!(lower.contains("content-type: application/json"));
        assert!(lower.contains("x-request-id: "));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"messages": [{"role": "user", "content": "How many customers?"}]})
        );
    }

    #[tokio::test]
    async fn ask_normalizes_quoted_answer() {
        let (base, _rx) = serve_once(
            "200 OK",
            r#"{"messages":[{"content":"\"**Total**\\n42\""}]}"#,
        );
        let answer = client_for(&base).ask("total?").await.unwrap();
        assert_eq!(answer, "**Total**\n42");
    }

    #[tokio::test]
    async fn ask_empty_payload_falls_back() {
        let (base, _rx) = serve_once("200 OK", "{}");
        let answer = client_for(&base).ask("anything").await.unwrap();
        assert_eq!(answer, NO_RESPONSE);
    }

    #[tokio::test]
    async fn ask_error_status_uses_backend_message() {
        let (base, _rx) = serve_once(
            "400 Bad Request",
            r#"{"messages":"Error in fetching chat response."}"#,
        );
        let err = client_for(&base).ask("q").await.unwrap_err();
        match &err {
            AskError::Status { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "Error in fetching chat response.");
            }
            _ => panic!("expected Status, got {:?}", err),
        }
    }

    #[tokio::test]
    async fn ask_error_status_empty_body_uses_reason() {
        let (base, _rx) = serve_once("500 Internal Server Error", "");
        let err = client_for(&base).ask("q").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[tokio::test]
    async fn ask_invalid_json_is_decode_error() {
        let (base, _rx) = serve_once("200 OK", "<html>oops</html>");
        let err = client_for(&base).ask("q").await.unwrap_err();
        assert!(matches!(err, AskError::Decode(_)));
    }

    #[tokio::test]
    async fn ask_empty_query_is_rejected_without_request() {
        let client = client_for("http://127.0.0.1:9");
        let err = client.ask("   ").await.unwrap_err();
        assert!(matches!(err, AskError::EmptyQuery));
    }

    #[tokio::test]
    async fn failed_connection_displays_error_prefix() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = client_for(&format!("http://127.0.0.1:{}", port));
        let result = client.ask("hello").await;
        let err = result.unwrap_err();
        assert!(matches!(err, AskError::Http(_)));
        assert!(display_error(&err).starts_with("Error: "));
    }
}
