//! `ChatProvider` implementation for the OpenAI-compatible client.

use async_trait::async_trait;
use tracing::debug;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{LlmError, Result};
use crate::message::Message;

use super::client::OpenAI;
use super::types::{OpenAIChatResponse, OpenAIModelList};

impl OpenAI {
    /// Parse the response into a [`ChatResponse`].
    pub(crate) fn parse_response(response: OpenAIChatResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::response_format("at least one choice", "empty choices"))?;

        let message = &choice.message;
        let text = match (&message.content, &message.refusal) {
            (Some(content), _) => content.clone(),
            (None, Some(refusal)) => {
                return Err(LlmError::provider("openai", format!("refused: {refusal}")).into());
            }
            (None, None) => String::new(),
        };

        Ok(ChatResponse {
            message: Message::assistant(text),
            usage: response.usage,
            model: response.model,
            id: response.id,
        })
    }

    pub(crate) async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<String> {
        let response = request.send().await.map_err(LlmError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        Ok(response.text().await.map_err(LlmError::from)?)
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        let body = self.build_body(request);
        debug!(
            url = %url,
            model = %body.model,
            messages = body.messages.len(),
            "sending chat completion"
        );

        let response_text = self.send_checked(self.build_request(&url).json(&body)).await?;
        let parsed: OpenAIChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            LlmError::response_format(
                "valid chat completion response",
                format!("parse error: {e}, response: {response_text}"),
            )
        })?;

        Self::parse_response(parsed)
    }

    async fn list_models(&self, limit: usize) -> Result<Vec<String>> {
        let url = format!("{}?limit={limit}", self.models_url());
        debug!(url = %url, "listing models");

        let response_text = self.send_checked(self.build_get(&url)).await?;
        let parsed: OpenAIModelList = serde_json::from_str(&response_text).map_err(|e| {
            LlmError::response_format("model list", format!("parse error: {e}"))
        })?;

        Ok(parsed
            .data
            .into_iter()
            .take(limit)
            .map(|model| model.id)
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        self.model()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ChatResponse> {
        OpenAI::parse_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn parses_first_choice() {
        let resp = parse(
            r#"{
                "id": "cmpl-1",
                "model": "Llama-4-Scout-17B-16E-Instruct-FP8",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Right corner"}, "finish_reason": "stop"},
                    {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
                ],
                "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
            }"#,
        )
        .unwrap();

        assert_eq!(resp.text().unwrap(), "Right corner");
        assert_eq!(resp.id.as_deref(), Some("cmpl-1"));
        assert_eq!(resp.usage.unwrap().total_tokens, 13);
    }

    #[test]
    fn empty_choices_is_format_error() {
        let err = parse(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Llm(LlmError::ResponseFormat { .. })
        ));
    }

    #[test]
    fn refusal_is_provider_error() {
        let err = parse(r#"{"choices": [{"message": {"content": null, "refusal": "no"}}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("refused: no"));
    }

    #[test]
    fn parses_model_list() {
        let list: OpenAIModelList = serde_json::from_str(
            r#"{"object": "list", "data": [{"id": "a", "object": "model"}, {"id": "b"}]}"#,
        )
        .unwrap();
        let ids: Vec<_> = list.data.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
