//! OpenAI-compatible API client.
//!
//! Works against any endpoint speaking the chat-completions protocol; the
//! defaults point at the Llama API compatibility layer. Supports:
//! - Chat completions with text and image content
//! - Model listing

mod chat;
mod client;
mod config;
mod types;

pub use client::OpenAI;
pub use config::OpenAIConfig;
