//! Model registry for the configured text generator

use super::{all_models, LlmService, LoggingService};
use std::collections::HashMap;
use std::sync::Arc;

const PREFERRED_DEFAULT: &str = "o3-mini";

/// Configuration for the generator backend
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    /// OpenAI-compatible base URL (e.g., `http://localhost:11434/v1`)
    pub gateway: Option<String>,
    /// Default model ID
    pub default_model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            default_model: std::env::var("DEFAULT_MODEL").ok(),
        }
    }
}

/// Registry of available models
pub struct ModelRegistry {
    services: HashMap<String, Arc<dyn LlmService>>,
    default_model: String,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        // In gateway mode the gateway handles auth, so any key will do
        let api_key = match (&config.openai_api_key, &config.gateway) {
            (Some(key), _) if !key.is_empty() => key.clone(),
            (_, Some(_)) => "implicit".to_string(),
            _ => String::new(),
        };

        let mut services: HashMap<String, Arc<dyn LlmService>> = HashMap::new();
        for def in all_models() {
            match def.create(&api_key, config.gateway.as_deref()) {
                Ok(service) => {
                    tracing::debug!(model = def.id, description = def.description, "Model registered");
                    services.insert(
                        def.id.to_string(),
                        Arc::new(LoggingService::new(service)),
                    );
                }
                Err(reason) => tracing::debug!(model = def.id, %reason, "Model unavailable"),
            }
        }

        let default_model = config
            .default_model
            .clone()
            .unwrap_or_else(|| PREFERRED_DEFAULT.to_string());

        if !services.is_empty() && !services.contains_key(&default_model) {
            tracing::warn!(
                model = %default_model,
                available = ?services.keys().collect::<Vec<_>>(),
                "DEFAULT_MODEL is not a known model; no generator will be used"
            );
        }

        Self {
            services,
            default_model,
        }
    }

    /// Registry with a single service, for wiring fakes into the server
    #[cfg(test)]
    pub fn with_service(service: Arc<dyn LlmService>) -> Self {
        let id = service.model_id().to_string();
        let mut services = HashMap::new();
        services.insert(id.clone(), service);
        Self {
            services,
            default_model: id,
        }
    }

    /// Get a model by ID
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn LlmService>> {
        self.services.get(model_id).cloned()
    }

    /// Get the default model
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.get(&self.default_model)
    }

    /// Get the default model ID
    pub fn default_model_id(&self) -> &str {
        &self.default_model
    }

    /// List all available model IDs
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.services.keys().cloned().collect();
        models.sort();
        models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_api_keys_no_models() {
        let registry = ModelRegistry::new(&LlmConfig::default());
        assert!(registry.available_models().is_empty());

        assert!(registry.default().is_none());
    }

    #[test]
    fn test_api_key_enables_models() {
        let config = LlmConfig {
            openai_api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);

        assert_eq!(registry.available_models(), vec!["gpt-4o", "gpt-4o-mini", "o3-mini"]);
        assert_eq!(registry.default_model_id(), "o3-mini");
        assert_eq!(registry.default().unwrap().model_id(), "o3-mini");
    }

    #[test]
    fn test_gateway_without_key() {
        let config = LlmConfig {
            gateway: Some("http://localhost:8080/v1".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);
        assert!(registry.get("gpt-4o-mini").is_some());
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let config = LlmConfig {
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(ModelRegistry::new(&config).available_models().is_empty());
    }

    #[test]
    fn test_custom_default_model() {
        let config = LlmConfig {
            openai_api_key: Some("test-key".to_string()),
            default_model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);
        assert_eq!(registry.default_model_id(), "gpt-4o-mini");
        assert_eq!(registry.default().unwrap().model_id(), "gpt-4o-mini");
    }

    #[test]
    fn test_unknown_default_yields_none() {
        let config = LlmConfig {
            openai_api_key: Some("test-key".to_string()),
            default_model: Some("claude-9".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);
        assert!(!registry.available_models().is_empty());
        assert!(registry.default().is_none());
    }
}
