//! Momentum analysis prompts.
//!
//! The model receives three messages in order: a developer message with the
//! coach persona and answer format, a user message with the court diagram,
//! and a user message with the play-by-play text. [`Analyst`] builds these,
//! sends them through a [`ChatProvider`](crate::chat::ChatProvider), and returns the answer text.

use tracing::{debug, info};

use crate::chat::{ChatRequest, SharedChatProvider};
use crate::error::{LlmError, Result};
use crate::message::Message;
use crate::transcript::Selector;

/// Reply format the model is asked to follow.
pub const ANSWER_FORMAT: &str = "Location on court \u{2014} Quarter, Time, Player, Description.";

/// Sampling settings for one analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Model override. `None` uses the provider default.
    pub model: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl AnalysisOptions {
    /// Defaults for command-line runs.
    pub const CLI_MAX_TOKENS: u32 = 256;
    /// Defaults for the HTTP endpoint.
    pub const SERVER_MAX_TOKENS: u32 = 512;

    /// Options tuned for the HTTP endpoint.
    #[must_use]
    pub fn for_server() -> Self {
        Self {
            max_tokens: Self::SERVER_MAX_TOKENS,
            ..Self::default()
        }
    }

    /// Sets the model override.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets max tokens.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: Self::CLI_MAX_TOKENS,
            temperature: 0.0,
        }
    }
}

/// Messages for a whole-game analysis.
#[must_use]
pub fn full_game_messages(image_uri: &str, transcript: &str) -> Vec<Message> {
    let developer = format!(
        "You are a veteran basketball coach who can see both text and images. \
         I will first send you a court diagram, and then a full play-by-play transcript. \
         When you receive both, identify the exact spot on the court where the most \
         momentum-shifting 3-pointer occurred. Respond in this format:\n\n\
         {ANSWER_FORMAT}\n\
         When you identify the location, also explain why that shot shifted momentum \
         and what the score became immediately afterward."
    );

    let instructions = format!(
        "Below is the full play-by-play transcript. \
         Using the court diagram I just provided, identify the exact spot on the court \
         where the most momentum-shifting 3-pointer occurred. \
         Format your reply as:\n\
         {ANSWER_FORMAT}\n\n\
         {transcript}"
    );

    vec![
        Message::developer(developer),
        Message::user_image(image_uri),
        Message::user(instructions),
    ]
}

/// Messages for a single-selector analysis of an already filtered transcript.
#[must_use]
pub fn quarter_messages(selector: Selector, image_uri: &str, filtered: &str) -> Vec<Message> {
    let developer = format!(
        "You are a veteran basketball coach who can see both text and images. \
         Focus on {selector} only. Identify the exact spot on the court where the most \
         momentum-shifting 3-pointer occurred. Format: {ANSWER_FORMAT}"
    );

    vec![
        Message::developer(developer),
        Message::user_image(image_uri),
        Message::user(filtered),
    ]
}

/// Runs momentum analyses against a chat provider.
#[derive(Clone)]
pub struct Analyst {
    provider: SharedChatProvider,
    options: AnalysisOptions,
}

impl std::fmt::Debug for Analyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyst")
            .field("provider", &self.provider.provider_name())
            .field("options", &self.options)
            .finish()
    }
}

impl Analyst {
    /// Create an analyst over `provider`.
    #[must_use]
    pub fn new(provider: SharedChatProvider, options: AnalysisOptions) -> Self {
        Self { provider, options }
    }

    /// Analyze the full, unfiltered transcript.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; an answer without text is a
    /// response-format error.
    pub async fn analyze_full_game(&self, image_uri: &str, transcript: &str) -> Result<String> {
        self.run(full_game_messages(image_uri, transcript)).await
    }

    /// Analyze one selector's lines, already filtered by the caller.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; an answer without text is a
    /// response-format error.
    pub async fn analyze_quarter(
        &self,
        selector: Selector,
        image_uri: &str,
        filtered: &str,
    ) -> Result<String> {
        info!(quarter = %selector, lines = filtered.lines().count(), "analyzing quarter");
        self.run(quarter_messages(selector, image_uri, filtered)).await
    }

    async fn run(&self, messages: Vec<Message>) -> Result<String> {
        let model = self
            .options
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_owned());

        let request = ChatRequest::with_messages(model, messages)
            .max_tokens(self.options.max_tokens)
            .temperature(self.options.temperature);

        let response = self.provider.chat(&request).await?;
        debug!(model = ?response.model, usage = ?response.usage, "analysis answered");

        response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::response_format("text answer", "empty message").into())
    }
}
