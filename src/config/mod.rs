//! Configuration (code > env > `.env` file).

use std::fmt;
use std::time::Duration;

use crate::error::RespkitError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const DEFAULT_MODEL_ENV: &str = "OPENAI_DEFAULT_MODEL";

/// Settings used to build an [`OpenAiClient`](crate::provider::openai::OpenAiClient).
///
/// Nothing here is global: build one with [`RespkitConfig::from_env`] or the
/// `with_*` setters and hand it to whoever needs it.
#[derive(Clone)]
pub struct RespkitConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    default_model: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for RespkitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RespkitConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for RespkitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RespkitConfig {
    /// Empty config: no key, default base URL and timeout.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            default_model: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load from environment variables (OPENAI_API_KEY, OPENAI_BASE_URL,
    /// OPENAI_DEFAULT_MODEL), reading a `.env` file first when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        Self {
            api_key: non_empty_var(API_KEY_ENV),
            base_url: non_empty_var(BASE_URL_ENV),
            default_model: non_empty_var(DEFAULT_MODEL_ENV),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The API key, or a configuration error when it is missing or blank.
    pub fn require_api_key(&self) -> Result<&str, RespkitError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                RespkitError::Configuration(format!("Missing {API_KEY_ENV} environment variable."))
            })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// Default-model override, bypassing live selection when set.
    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_configuration_error() {
        let err = RespkitConfig::new().require_api_key().unwrap_err();
        match err {
            RespkitError::Configuration(message) => assert!(message.contains(API_KEY_ENV)),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn blank_key_is_rejected() {
        let config = RespkitConfig::new().with_api_key("   ");
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn base_url_defaults_and_strips_trailing_slash() {
        assert_eq!(RespkitConfig::new().base_url(), DEFAULT_BASE_URL);
        let config = RespkitConfig::new().with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = RespkitConfig::new().with_api_key("sk-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
    }
}
