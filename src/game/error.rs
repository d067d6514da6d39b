//! Game error types

use crate::llm::LlmError;
use std::time::Duration;
use thiserror::Error;

/// Failure of the delegate path
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("no text generator is configured")]
    Unavailable,
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Per-connection failures that never reach the client as frames
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),
    #[error("channel closed")]
    ChannelGone,
}
