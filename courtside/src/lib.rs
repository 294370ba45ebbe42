//! Courtside - find the momentum-shifting three in a basketball game.
//!
//! This crate sends a play-by-play transcript and a court diagram to a
//! multimodal, OpenAI-compatible model and asks where the most
//! momentum-shifting three-pointer happened. It provides quarter filtering of
//! transcripts, image encoding, the chat client, and an HTTP endpoint.

pub mod analysis;
pub mod chat;
pub mod error;
pub mod image;
pub mod llms;
pub mod message;
pub mod prelude;
pub mod server;
pub mod transcript;
pub mod usage;

pub use error::{Error, LlmError, Result, TranscriptError};
