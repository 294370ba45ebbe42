//! Token usage reported by chat-completion responses.

use serde::{Deserialize, Serialize};

/// Token usage statistics from one model call.
///
/// Maps to the `usage` object of chat-completion responses:
/// ```json
/// { "prompt_tokens": 100, "completion_tokens": 50, "total_tokens": 150 }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    #[serde(default, alias = "prompt_tokens")]
    pub input_tokens: u32,

    /// Number of tokens in the completion.
    #[serde(default, alias = "completion_tokens")]
    pub output_tokens: u32,

    /// Total tokens used.
    #[serde(default)]
    pub total_tokens: u32,
}
