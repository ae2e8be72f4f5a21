/// LLM Gateway — the single point of entry for all inference backend calls.
///
/// ARCHITECTURAL RULE: No other module may call an inference API directly.
/// Handlers and the orchestrator resolve a `Backend` from the `ProviderRegistry`
/// and call `Backend::invoke`, which always yields an `AgentResult`.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub mod gemini;
pub mod ollama;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{provider} API key is not configured")]
    MissingApiKey { provider: &'static str },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Unreadable response body: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// AgentResult
// ────────────────────────────────────────────────────────────────────────────

/// Normalized output of one task invocation.
///
/// Serializes to the parsed object itself, `{"text": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentResult {
    Structured(Map<String, Value>),
    Text { text: String },
    Error { error: String },
}

impl AgentResult {
    /// Parses backend text as a JSON object when it looks like one,
    /// otherwise keeps the raw text. Parse errors are swallowed.
    pub fn from_response_text(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
                return AgentResult::Structured(map);
            }
        }
        AgentResult::Text { text: raw }
    }

    pub fn error(message: impl Into<String>) -> Self {
        AgentResult::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AgentResult::Error { .. })
    }
}

impl From<Result<String, LlmError>> for AgentResult {
    fn from(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => AgentResult::from_response_text(text),
            Err(e) => AgentResult::error(e.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Provider trait
// ────────────────────────────────────────────────────────────────────────────

/// One inference backend transport. Implementations return the raw model
/// text; normalization into `AgentResult` happens once, in `Backend::invoke`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Registry key, lower-case.
    fn name(&self) -> &'static str;

    fn default_model(&self) -> &str;

    /// Raw model text for one prompt. `system` is empty when there is no role instruction.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, LlmError>;

    /// Models the backend reports as available. Used for connectivity checks.
    async fn list_models(&self) -> Result<Vec<Value>, LlmError>;
}

/// A provider paired with the model to run on it.
#[derive(Clone)]
pub struct Backend {
    pub provider: Arc<dyn InferenceProvider>,
    pub model: String,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish()
    }
}

impl Backend {
    /// Issues exactly one request and normalizes the outcome. Never fails.
    pub async fn invoke(&self, prompt: &str, system: Option<&str>) -> AgentResult {
        let result = self
            .provider
            .generate(&self.model, prompt, system.unwrap_or_default())
            .await;

        match &result {
            Ok(text) => debug!(
                "{} ({}) returned {} chars",
                self.provider.name(),
                self.model,
                text.len()
            ),
            Err(e) => warn!("{} ({}) call failed: {e}", self.provider.name(), self.model),
        }

        AgentResult::from(result)
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

/// Providers keyed by name, with a fallback used for absent or unknown selectors.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn InferenceProvider>>,
    default_provider: Arc<dyn InferenceProvider>,
}

impl ProviderRegistry {
    pub fn new(default_provider: Arc<dyn InferenceProvider>) -> Self {
        let mut providers = HashMap::new();
        providers.insert(default_provider.name(), default_provider.clone());
        Self {
            providers,
            default_provider,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn InferenceProvider>) -> Self {
        self.providers.insert(provider.name(), provider);
        self
    }

    /// Builds the registry from config, with `default_name` as the fallback.
    /// Unknown names fall back to the first provider given.
    pub fn from_providers(
        default_name: &str,
        providers: Vec<Arc<dyn InferenceProvider>>,
    ) -> Option<Self> {
        let default = providers
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(default_name))
            .or_else(|| providers.first())?
            .clone();

        Some(
            providers
                .into_iter()
                .fold(Self::new(default), |registry, p| registry.with_provider(p)),
        )
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn default_backend(&self) -> Backend {
        Backend {
            provider: self.default_provider.clone(),
            model: self.default_provider.default_model().to_string(),
        }
    }

    /// Resolves a request's selector:
    /// - absent or blank → default provider, default model
    /// - `"gemini"` → that provider, its default model
    /// - `"gemini:gemini-1.5-pro"` → that provider and model
    /// - anything else → default provider with the selector as model name
    pub fn resolve(&self, selector: Option<&str>) -> Backend {
        let selector = match selector.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return self.default_backend(),
        };

        if let Some(provider) = self.lookup(selector) {
            return Backend {
                model: provider.default_model().to_string(),
                provider,
            };
        }

        if let Some((name, model)) = selector.split_once(':') {
            if let Some(provider) = self.lookup(name) {
                let model = model.trim();
                return Backend {
                    model: if model.is_empty() {
                        provider.default_model().to_string()
                    } else {
                        model.to_string()
                    },
                    provider,
                };
            }
        }

        Backend {
            provider: self.default_provider.clone(),
            model: selector.to_string(),
        }
    }

    fn lookup(&self, name: &str) -> Option<Arc<dyn InferenceProvider>> {
        self.providers
            .get(name.trim().to_lowercase().as_str())
            .cloned()
    }
}
