//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,ignore
//! use courtside::prelude::*;
//! ```

pub use crate::analysis::{AnalysisOptions, Analyst};
pub use crate::chat::{ChatProvider, ChatRequest, ChatResponse, SharedChatProvider};
pub use crate::error::{Error, LlmError, Result, TranscriptError};
pub use crate::image::{encode_image_file, normalize_image_payload};
pub use crate::llms::{MockProvider, OpenAI, OpenAIConfig};
pub use crate::message::{Content, ContentPart, Message, Role};
pub use crate::server::{ServeConfig, router, serve};
pub use crate::transcript::{
    Period, Selector, filter_by_period, load_transcript, preview, read_transcript_from,
    select_period,
};
