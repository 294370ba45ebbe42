//! Configuration schema definitions.
//!
//! Every section has defaults, so an empty or missing file is a valid
//! configuration. Only the API key has no usable default.

use courtside::analysis::AnalysisOptions;
use courtside::llms::OpenAIConfig;
use courtside::server::ServeConfig;
use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourtsideConfig {
    /// Model provider settings.
    #[serde(default)]
    pub provider: ProviderSection,

    /// Sampling settings.
    #[serde(default)]
    pub analysis: AnalysisSection,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,
}

/// OpenAI-compatible provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSection {
    /// API key. Usually supplied through `LLAMA_API_KEY` instead.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default model.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    OpenAIConfig::DEFAULT_BASE_URL.to_owned()
}

fn default_model() -> String {
    OpenAIConfig::DEFAULT_MODEL.to_owned()
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Max tokens for command-line analyses.
    #[serde(default = "default_cli_max_tokens")]
    pub max_tokens: u32,
    /// Max tokens for analyses served over HTTP.
    #[serde(default = "default_server_max_tokens")]
    pub server_max_tokens: u32,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f32,
}

const fn default_cli_max_tokens() -> u32 {
    AnalysisOptions::CLI_MAX_TOKENS
}

const fn default_server_max_tokens() -> u32 {
    AnalysisOptions::SERVER_MAX_TOKENS
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            max_tokens: default_cli_max_tokens(),
            server_max_tokens: default_server_max_tokens(),
            temperature: 0.0,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Interface to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    ServeConfig::default().bind
}

fn default_port() -> u16 {
    ServeConfig::default().port
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl CourtsideConfig {
    /// Override file values with `LLAMA_*` variables from `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(OpenAIConfig::API_KEY_ENV) {
            self.provider.api_key = Some(key);
        }
        if let Some(url) = get(OpenAIConfig::BASE_URL_ENV) {
            self.provider.base_url = url;
        }
        if let Some(model) = get(OpenAIConfig::MODEL_ENV) {
            self.provider.model = model;
        }
    }

    /// Client configuration for the provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no key is configured.
    pub fn openai_config(&self) -> ConfigResult<OpenAIConfig> {
        let api_key = self
            .provider
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(OpenAIConfig::new(api_key)
            .with_base_url(&self.provider.base_url)
            .with_model(&self.provider.model)
            .with_timeout(self.provider.timeout_secs))
    }

    /// Sampling options for command-line runs.
    #[must_use]
    pub fn cli_options(&self) -> AnalysisOptions {
        AnalysisOptions::default()
            .with_max_tokens(self.analysis.max_tokens)
            .with_temperature(self.analysis.temperature)
    }

    /// Sampling options for the HTTP endpoint.
    #[must_use]
    pub fn server_options(&self) -> AnalysisOptions {
        AnalysisOptions::for_server()
            .with_max_tokens(self.analysis.server_max_tokens)
            .with_temperature(self.analysis.temperature)
    }

    /// Listener settings for the HTTP endpoint.
    #[must_use]
    pub fn serve_config(&self) -> ServeConfig {
        ServeConfig {
            bind: self.server.bind.clone(),
            port: self.server.port,
        }
    }

    /// A copy safe to print, with the API key masked.
    #[must_use]
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        copy.provider.api_key = copy.provider.api_key.as_deref().map(mask_secret);
        copy
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_owned();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
