//! Model Client collaborator.
//!
//! The orchestrator only sees the [`ModelClient`] trait; the bundled
//! [`OpenAiCompatClient`] speaks the OpenAI chat-completions wire shape via
//! `reqwest`, which covers the hosted endpoints this agent is deployed
//! against. Timeouts and retries are this collaborator's concern — the
//! orchestrator converts any failure into user-visible text.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AgentConfig;

/// Hard network-level timeout for one completion call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Trait + errors
// ---------------------------------------------------------------------------

/// Failure modes of a model call.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("model request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint rejected our credentials.
    #[error("model auth rejected (HTTP {status})")]
    Auth { status: u16 },

    /// Rate limit or quota exhausted.
    #[error("model quota exhausted (HTTP 429)")]
    Quota,

    /// Any other non-success status.
    #[error("model API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx reply whose body did not carry a completion.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// An opaque language-model collaborator.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run one completion. `temperature` and `max_tokens` are per-call
    /// because ancillary operations use tighter budgets than chat turns.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ModelError>;
}

// ---------------------------------------------------------------------------
// OpenAI-compatible HTTP client
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// [`ModelClient`] for any OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
    top_p: Option<f32>,
}

impl OpenAiCompatClient {
    /// Build a client from an [`AgentConfig`]. The API key falls back to
    /// the environment when the config does not carry one.
    pub fn new(config: &AgentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolved_api_key(),
            top_p: config.top_p,
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiCompatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ModelError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system_prompt,
                },
                WireMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            top_p: self.top_p,
            max_tokens,
            stream: false,
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            return Err(match code {
                401 | 403 => ModelError::Auth { status: code },
                429 => ModelError::Quota,
                _ => ModelError::Api {
                    status: code,
                    message: response.text().await.unwrap_or_default(),
                },
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::MalformedResponse("reply carried no choices".to_string()))
    }
}
