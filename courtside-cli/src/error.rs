//! Error type for the courtside command line.

use crate::config::ConfigError;

/// Everything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// Library error: transcript, image or model call.
    #[error(transparent)]
    Courtside(#[from] courtside::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
