//! Conversational delegate backed by the text generator

use super::GenerationFailure;
use crate::llm::{LlmRequest, LlmService};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Default bound on a single generation call
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// One conversation's transcript plus the generator that extends it.
///
/// The transcript alternates utterance and reply. It is never truncated, and
/// the whole of it is the prompt for every call.
pub struct ConversationAgent {
    generator: Option<Arc<dyn LlmService>>,
    transcript: Vec<String>,
    timeout: Duration,
}

impl ConversationAgent {
    pub fn new(generator: Option<Arc<dyn LlmService>>, timeout: Duration) -> Self {
        Self {
            generator,
            transcript: Vec::new(),
            timeout,
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Append `utterance`, generate a reply over the full transcript, and
    /// append the reply.
    ///
    /// On failure the utterance is removed again, so the transcript only ever
    /// holds complete turns.
    pub async fn submit(&mut self, utterance: &str) -> Result<String, GenerationFailure> {
        let generator = self
            .generator
            .clone()
            .ok_or(GenerationFailure::Unavailable)?;

        self.transcript.push(utterance.to_string());
        let request = LlmRequest::prompt(self.transcript.join("\n"));

        let result = match timeout(self.timeout, generator.complete(&request)).await {
            Ok(Ok(response)) => Ok(response.text),
            Ok(Err(e)) => Err(GenerationFailure::Llm(e)),
            Err(_) => Err(GenerationFailure::Timeout(self.timeout)),
        };

        match result {
            Ok(reply) => {
                self.transcript.push(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                self.transcript.pop();
                tracing::warn!(
                    model = generator.model_id(),
                    turns = self.transcript.len() / 2,
                    error = %e,
                    "Generation failed"
                );
                Err(e)
            }
        }
    }
}
