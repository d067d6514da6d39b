//! Model definitions for the text generator
//!
//! Every model is reached through the `OpenAI` chat completions API, either
//! directly or through an OpenAI-compatible gateway.

use super::{LlmService, OpenAIModel, OpenAIService};
use std::sync::Arc;

/// Model definition with metadata
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// User-facing model ID (e.g., "o3-mini")
    pub id: &'static str,
    /// Human-readable description
    pub description: &'static str,
    pub model: OpenAIModel,
}

impl ModelDef {
    /// Build the service for this model
    pub fn create(&self, api_key: &str, gateway: Option<&str>) -> Result<Arc<dyn LlmService>, String> {
        if api_key.is_empty() {
            return Err(format!("{} requires OPENAI_API_KEY or LLM_GATEWAY", self.id));
        }
        let service = OpenAIService::new(api_key.to_string(), self.model, gateway)
            .map_err(|e| e.to_string())?;
        Ok(Arc::new(service))
    }
}

/// Get all available model definitions
pub fn all_models() -> &'static [ModelDef] {
    &[
        ModelDef {
            id: "o3-mini",
            description: "OpenAI o3-mini (reasoning, default narrator)",
            model: OpenAIModel::O3Mini,
        },
        ModelDef {
            id: "gpt-4o",
            description: "OpenAI GPT-4o",
            model: OpenAIModel::GPT4o,
        },
        ModelDef {
            id: "gpt-4o-mini",
            description: "OpenAI GPT-4o mini (fast, cheap)",
            model: OpenAIModel::GPT4oMini,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_api_names() {
        for def in all_models() {
            assert_eq!(def.id, def.model.api_name());
            assert!(!def.description.is_empty());
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let def = &all_models()[0];
        let err = def.create("", None).err().unwrap();
        assert!(err.contains("OPENAI_API_KEY"));
    }
}
