//! LLM backend implementations.
//!
//! - [`openai`] - OpenAI-compatible chat completions (Llama API by default)
//! - [`mock`] - canned responses for tests and offline runs

pub mod error;
pub mod mock;
pub mod openai;

pub use mock::MockProvider;
pub use openai::{OpenAI, OpenAIConfig};
