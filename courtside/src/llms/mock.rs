//! Mock provider for testing.
//!
//! Returns canned replies without any network access and records every
//! request it receives, so tests can assert on the exact prompt sent.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{LlmError, Result};

/// A canned reply.
#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(LlmError),
}

/// A provider that cycles through predefined replies.
///
/// # Example
///
/// ```rust,ignore
/// let provider = MockProvider::new(["Left wing, Q4 2:11, Smith, pull-up three"]);
/// let answer = provider.chat(&request).await?;
/// assert_eq!(provider.requests().len(), 1);
/// ```
#[derive(Debug)]
pub struct MockProvider {
    model_id: String,
    replies: Vec<Reply>,
    models: Vec<String>,
    index: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    /// Create a mock that answers with the given texts in sequence, cycling.
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_replies(replies.into_iter().map(|r| Reply::Text(r.into())).collect())
    }

    /// Create a mock whose every call fails with `error`.
    #[must_use]
    pub fn failing(error: LlmError) -> Self {
        Self::from_replies(vec![Reply::Fail(error)])
    }

    fn from_replies(replies: Vec<Reply>) -> Self {
        Self {
            model_id: "mock-model".to_owned(),
            replies,
            models: Vec::new(),
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Set the ids returned by [`ChatProvider::list_models`].
    #[must_use]
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }

        if self.replies.is_empty() {
            return Err(LlmError::internal("mock provider has no replies").into());
        }
        let index = self.index.fetch_add(1, Ordering::SeqCst) % self.replies.len();

        match &self.replies[index] {
            Reply::Text(text) => Ok(ChatResponse::from_text(text.clone()).with_model(&self.model_id)),
            Reply::Fail(error) => Err(error.clone().into()),
        }
    }

    async fn list_models(&self, limit: usize) -> Result<Vec<String>> {
        Ok(self.models.iter().take(limit).cloned().collect())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cycles_replies_and_records_requests() {
        let provider = MockProvider::new(["one", "two"]);
        let request = ChatRequest::new("m").user("hi");

        let first = provider.chat(&request).await.unwrap();
        let second = provider.chat(&request).await.unwrap();
        let third = provider.chat(&request).await.unwrap();

        assert_eq!(first.text().unwrap(), "one");
        assert_eq!(second.text().unwrap(), "two");
        assert_eq!(third.text().unwrap(), "one");
        assert_eq!(provider.requests().len(), 3);
    }

    #[tokio::test]
    async fn failing_returns_error() {
        let provider = MockProvider::failing(LlmError::network("down"));
        let err = provider.chat(&ChatRequest::new("m")).await.unwrap_err();
        assert!(err.to_string().contains("down"));
    }

    #[tokio::test]
    async fn lists_configured_models() {
        let provider = MockProvider::new(["x"]).with_models(["a", "b", "c"]);
        assert_eq!(provider.list_models(2).await.unwrap(), ["a", "b"]);
    }
}
