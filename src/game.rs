//! Game core: command routing, conversation agents, and channel sessions
//!
//! Each connection gets its own `ConnectionSession` holding its own
//! `ConversationAgent`; only the generator behind the agents is shared.

pub mod agent;
mod error;
pub mod protocol;
mod registry;
mod router;
pub mod session;
pub mod style;

pub use agent::ConversationAgent;
pub use error::{GenerationFailure, SessionError};
pub use protocol::ServerFrame;
pub use registry::SessionRegistry;
pub use router::{CommandRouter, UnrecognizedStrategy};
pub use session::ConnectionSession;

use crate::llm::ModelRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Per-process game settings, fixed at startup
#[derive(Debug, Clone, Copy)]
pub struct GameSettings {
    pub unrecognized: UnrecognizedStrategy,
    pub generation_timeout: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            unrecognized: UnrecognizedStrategy::default(),
            generation_timeout: agent::DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

/// Builds the per-connection pieces from shared configuration
#[derive(Clone)]
pub struct Game {
    settings: GameSettings,
    llm_registry: Arc<ModelRegistry>,
}

impl Game {
    /// Unrecognized commands fall back to `Echo` when the registry has no
    /// usable default generator.
    pub fn new(mut settings: GameSettings, llm_registry: Arc<ModelRegistry>) -> Self {
        if settings.unrecognized == UnrecognizedStrategy::Converse && llm_registry.default().is_none() {
            tracing::warn!(
                model = %llm_registry.default_model_id(),
                "No generator available (set OPENAI_API_KEY or LLM_GATEWAY, and a known DEFAULT_MODEL); echoing unrecognized commands"
            );
            settings.unrecognized = UnrecognizedStrategy::Echo;
        }
        Self {
            settings,
            llm_registry,
        }
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn llm_registry(&self) -> &ModelRegistry {
        &self.llm_registry
    }

    /// A fresh agent with an empty transcript, for one connection
    pub fn new_agent(&self) -> ConversationAgent {
        ConversationAgent::new(self.llm_registry.default(), self.settings.generation_timeout)
    }

    pub fn router(&self) -> CommandRouter {
        CommandRouter::new(self.settings.unrecognized)
    }
}
