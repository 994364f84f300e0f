//! LLM Client is the single point of entry for every chat-completion call in the service.
//!
//! No handler talks to a provider's HTTP API directly; they build a
//! `CompletionRequest` and hand it to a `CompletionProvider`.
//!
//! Calls are single-shot: no retries, no backoff. A failed call is surfaced
//! to the caller immediately.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod anthropic;
pub mod openai;
#[cfg(test)]
pub mod stub;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiCompatClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl LlmError {
    /// Case-insensitive substring match against the rendered error message.
    /// Providers do not expose a stable typed code for billing/quota failures,
    /// so handlers classify on wording.
    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        let message = self.to_string().to_lowercase();
        needles.iter().any(|n| message.contains(n))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Provider-neutral completion request. Each client maps `system` onto its
/// own wire shape.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A chat-completion backend. Carried in `AppState` as `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short label used in logs ("openai", "groq", "anthropic").
    fn name(&self) -> &str;

    /// Runs one completion. `Ok(None)` means the provider answered but
    /// produced no usable text.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError>;
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Pulls a human-readable message out of a provider error body.
/// Both OpenAI-style and Anthropic-style bodies nest it under `error.message`.
fn api_error_message(body: String) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Treats empty and whitespace-only completions as absent.
fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
