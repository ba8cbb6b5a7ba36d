use std::env;

use reqwest::Url;

use crate::core::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CHAT_PATH: &str = "/threads/chat";

#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the chat endpoint (base URL + fixed path).
    pub endpoint: Url,
}

/// Load configuration from environment. `base_url_override` (from `--url`) wins over
/// `ASK_FORM_BASE_URL`.
pub fn load(base_url_override: Option<&str>) -> Result<Config, ConfigError> {
    let base_url = match base_url_override {
        Some(url) => url.to_string(),
        None => env::var("ASK_FORM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
    };
    let path = env::var("ASK_FORM_CHAT_PATH").unwrap_or_else(|_| DEFAULT_CHAT_PATH.to_string());
    let endpoint = endpoint_url(&base_url, &path)?;
    log::debug!("chat endpoint: {}", endpoint);
    Ok(Config { endpoint })
}

/// Join base URL and path with exactly one `/` and validate the result.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ConfigError> {
    let joined = format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    );
    let url = Url::parse(&joined).map_err(|e| ConfigError::InvalidEndpoint {
        url: joined.clone(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            url: joined,
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
