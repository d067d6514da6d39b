//! API request and response types

use serde::{Deserialize, Serialize};

/// Body of the legacy command endpoint
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// Reply of the legacy command endpoint
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
}

/// Process health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`
    pub status: &'static str,
    pub store: StoreHealth,
    pub active_connections: usize,
    /// Default model ID, when a generator is configured
    pub generator: Option<String>,
    pub unrecognized_commands: &'static str,
}

/// Player store reachability
#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
