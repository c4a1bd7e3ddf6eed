//! Agent configuration.
//!
//! Collects the model identity, endpoint and generation parameters in one
//! place so hosts can construct an agent without spelling out every knob.

use serde::{Deserialize, Serialize};

/// Environment variable consulted for the model API key when none is set
/// explicitly.
pub const API_KEY_ENV: &str = "SOLACE_API_KEY";

/// Default chat model identifier.
pub const DEFAULT_MODEL: &str = "meta/llama-3.1-405b-instruct";

/// Default OpenAI-compatible API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";

/// Configuration for one agent instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Chat model identifier sent to the completion endpoint.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// API key. When `None`, the client falls back to [`API_KEY_ENV`].
    pub api_key: Option<String>,
    /// Sampling temperature for conversational turns. Kept low so safety
    /// framing stays consistent across retries.
    pub temperature: f32,
    /// Nucleus sampling parameter, when the endpoint supports it.
    pub top_p: Option<f32>,
    /// Maximum tokens generated per conversational turn.
    pub max_tokens: u32,
    /// Maximum number of characters of page text embedded in a prompt.
    pub page_excerpt_limit: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            temperature: 0.15,
            top_p: Some(0.7),
            max_tokens: 1024,
            page_excerpt_limit: 8000,
        }
    }
}

impl AgentConfig {
    /// Config pointing at a custom OpenAI-compatible endpoint.
    pub fn with_endpoint(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Resolve the API key: explicit value first, then [`API_KEY_ENV`].
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }
}
