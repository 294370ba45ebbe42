//! Configuration management for the courtside CLI.
//!
//! Settings are resolved in this order, later wins:
//! 1. Default values
//! 2. Config file (`~/.courtside/config.toml`, or `--config`)
//! 3. `LLAMA_API_KEY`, `LLAMA_BASE_URL` and `LLAMA_MODEL`

mod schema;

pub use schema::CourtsideConfig;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// No API key in the file or the environment.
    #[error("Please set LLAMA_API_KEY in your environment before running.")]
    MissingApiKey,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Get the default config directory path.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".courtside")
}

/// Get the default config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from a specific path without environment overrides.
///
/// A missing file yields the defaults.
pub async fn load_config_from(path: &Path) -> ConfigResult<CourtsideConfig> {
    if !tokio::fs::try_exists(path).await? {
        info!(path = %path.display(), "config file not found, using defaults");
        return Ok(CourtsideConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: CourtsideConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Load configuration from `path` (or the default path) and apply the
/// process environment.
pub async fn load_config(path: Option<&Path>) -> ConfigResult<CourtsideConfig> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let mut config = load_config_from(&path).await?;
    config.apply_env(|name| std::env::var(name).ok());
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let cfg_dir = default_config_dir();
        assert!(cfg_dir.ends_with(".courtside"));

        let cfg_path = config_path();
        assert!(cfg_path.ends_with("config.toml"));
    }

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml"))
            .await
            .unwrap();
        assert_eq!(config, CourtsideConfig::default());
    }

    #[tokio::test]
    async fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[analysis]\nmax_tokens = 300\n")
            .await
            .unwrap();

        let config = load_config_from(&path).await.unwrap();
        assert_eq!(config.analysis.max_tokens, 300);
    }

    #[tokio::test]
    async fn invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[server\nport = ").await.unwrap();

        let err = load_config_from(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
