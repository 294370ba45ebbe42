//! OpenAI-compatible API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::chat::ChatRequest;
use crate::error::{LlmError, Result};
use crate::message::{Content, ContentPart, Message};

use super::config::OpenAIConfig;
use super::types::{
    OpenAIChatRequest, OpenAIContent, OpenAIContentPart, OpenAIErrorResponse, OpenAIImageUrl,
    OpenAIMessage,
};

/// Client for an OpenAI-compatible API.
///
/// Construct one explicitly and share it (it is cheap to clone); there is no
/// process-wide instance.
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub(crate) config: Arc<OpenAIConfig>,
    pub(crate) client: Client,
}

impl OpenAI {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an auth error if the API key is empty, or an internal error if
    /// the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::auth("openai", "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| LlmError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// See [`OpenAIConfig::from_env`] and [`OpenAI::new`].
    pub fn from_env() -> Result<Self> {
        let config = OpenAIConfig::from_env()?;
        Self::new(config)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the chat completions URL.
    pub(crate) fn chat_url(&self) -> String {
        self.endpoint("chat/completions")
    }

    /// Build the model list URL.
    pub(crate) fn models_url(&self) -> String {
        self.endpoint("models")
    }

    /// Build a JSON POST request with auth headers.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
    }

    /// Build a GET request with auth headers.
    pub(crate) fn build_get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url).bearer_auth(&self.config.api_key)
    }

    /// Convert a message to wire format.
    pub(crate) fn convert_message(msg: &Message) -> OpenAIMessage {
        let content = msg.content.as_ref().map(|c| match c {
            Content::Text(text) => OpenAIContent::Text(text.clone()),
            Content::Parts(parts) => OpenAIContent::Array(
                parts
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text { text } => OpenAIContentPart::Text { text: text.clone() },
                        ContentPart::ImageUrl { image_url } => OpenAIContentPart::ImageUrl {
                            image_url: OpenAIImageUrl {
                                url: image_url.url.clone(),
                                detail: image_url.detail.clone(),
                            },
                        },
                    })
                    .collect(),
            ),
        });

        OpenAIMessage {
            role: msg.role.as_str().to_owned(),
            content,
        }
    }

    /// Build the request body.
    pub(crate) fn build_body(&self, request: &ChatRequest) -> OpenAIChatRequest {
        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model.clone()
        };

        OpenAIChatRequest {
            model,
            messages: request.messages.iter().map(Self::convert_message).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Parse an error response body.
    pub(crate) fn parse_error(status: u16, body: &str) -> LlmError {
        if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let error = error_response.error;

            return match (status, error.code.or(error.error_type)) {
                (401 | 403, _) => LlmError::auth("openai", error.message),
                (429, _) => LlmError::rate_limited("openai"),
                (_, Some(code)) => LlmError::provider_code("openai", code, error.message),
                (_, None) => LlmError::provider("openai", error.message),
            };
        }

        LlmError::http_status(status, body.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn client() -> OpenAI {
        OpenAI::new(OpenAIConfig::new("test-key")).unwrap()
    }

    #[test]
    fn test_empty_key_fails_fast() {
        let err = OpenAI::new(OpenAIConfig::new("  ")).unwrap_err();
        assert!(matches!(err, crate::Error::Llm(LlmError::Auth { .. })));
    }

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        let client = OpenAI::new(
            OpenAIConfig::new("k").with_base_url("https://api.llama.com/compat/v1/"),
        )
        .unwrap();
        assert_eq!(
            client.chat_url(),
            "https://api.llama.com/compat/v1/chat/completions"
        );
        assert_eq!(client.models_url(), "https://api.llama.com/compat/v1/models");
    }

    #[test]
    fn test_message_conversion() {
        let converted = OpenAI::convert_message(&Message::developer("You are a coach."));
        assert_eq!(converted.role, "developer");
        assert!(matches!(converted.content, Some(OpenAIContent::Text(ref t)) if t == "You are a coach."));
    }

    #[test]
    fn test_image_message_conversion() {
        let converted = OpenAI::convert_message(&Message::user_image("data:image/png;base64,AA"));
        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "image_url");
        assert_eq!(json["content"][0]["image_url"]["url"], "data:image/png;base64,AA");
    }

    #[test]
    fn test_body_uses_default_model_when_empty() {
        let request = ChatRequest::new("").user("hi").max_tokens(256).temperature(0.0);
        let body = client().build_body(&request);
        assert_eq!(body.model, OpenAIConfig::DEFAULT_MODEL);
        assert_eq!(body.max_tokens, Some(256));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_body_keeps_explicit_model() {
        let body = client().build_body(&ChatRequest::new("Llama-3.3-8B-Instruct"));
        assert_eq!(body.model, "Llama-3.3-8B-Instruct");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_error_variants() {
        let body = r#"{"error": {"message": "bad key", "type": "invalid_request_error"}}"#;
        assert!(matches!(OpenAI::parse_error(401, body), LlmError::Auth { .. }));
        assert!(matches!(
            OpenAI::parse_error(429, body),
            LlmError::RateLimited { .. }
        ));

        let coded = r#"{"error": {"message": "no such model", "code": "model_not_found"}}"#;
        assert!(matches!(
            OpenAI::parse_error(404, coded),
            LlmError::Provider { ref code, .. } if code.as_deref() == Some("model_not_found")
        ));

        assert_eq!(
            OpenAI::parse_error(502, "upstream down"),
            LlmError::http_status(502, "upstream down")
        );
    }
}
