//! OpenAI-compatible client configuration.

use crate::error::{LlmError, Result};

/// Configuration for the [`OpenAI`](super::OpenAI) client.
#[derive(Clone)]
pub struct OpenAIConfig {
    /// API key for bearer authentication.
    pub api_key: String,
    /// Base URL for the API, without the endpoint path.
    pub base_url: String,
    /// Default model to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl OpenAIConfig {
    /// Default base URL (Llama API compatibility endpoint).
    pub const DEFAULT_BASE_URL: &'static str = "https://api.llama.com/compat/v1";
    /// Default multimodal model.
    pub const DEFAULT_MODEL: &'static str = "Llama-4-Scout-17B-16E-Instruct-FP8";
    /// Environment variable holding the API key.
    pub const API_KEY_ENV: &'static str = "LLAMA_API_KEY";
    /// Environment variable overriding the base URL.
    pub const BASE_URL_ENV: &'static str = "LLAMA_BASE_URL";
    /// Environment variable overriding the default model.
    pub const MODEL_ENV: &'static str = "LLAMA_MODEL";

    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `LLAMA_API_KEY` - Required API key
    /// - `LLAMA_BASE_URL` - Optional base URL
    /// - `LLAMA_MODEL` - Optional default model
    ///
    /// # Errors
    ///
    /// Returns an auth error if `LLAMA_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::auth(
                    "openai",
                    format!("Please set {} before running.", Self::API_KEY_ENV),
                )
            })?;

        let base_url = std::env::var(Self::BASE_URL_ENV)
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_owned());

        let model =
            std::env::var(Self::MODEL_ENV).unwrap_or_else(|_| Self::DEFAULT_MODEL.to_owned());

        Ok(Self {
            api_key,
            base_url,
            model,
            timeout_secs: Some(120),
        })
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            timeout_secs: Some(120),
        }
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = OpenAIConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, OpenAIConfig::DEFAULT_BASE_URL);
        assert_eq!(config.model, OpenAIConfig::DEFAULT_MODEL);
    }

    #[test]
    fn test_config_builder() {
        let config = OpenAIConfig::new("key")
            .with_model("Llama-3.3-70B-Instruct")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(60);

        assert_eq!(config.model, "Llama-3.3-70B-Instruct");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, Some(60));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", OpenAIConfig::new("secret-value"));
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("redacted"));
    }
}
