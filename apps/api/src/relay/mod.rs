//! Conversation Relay: forwards a running chat transcript to the configured
//! chat provider and hands back the reply text.

pub mod handlers;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, CompletionProvider, CompletionRequest};

/// Model used by the chat widget.
pub const MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 256;
const TEMPERATURE: f32 = 0.7;

/// Shown to the visitor when the provider answers without any text.
pub const FALLBACK_REPLY: &str = "Unable to generate response";

const BILLING_MARKERS: &[&str] = &["quota", "billing"];

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub content: String,
}

/// Sends `context` as the system prompt followed by the transcript, verbatim
/// and in order. One upstream call, no retries.
pub async fn relay_conversation(
    provider: &dyn CompletionProvider,
    request: ChatRequest,
) -> Result<ChatResponse, AppError> {
    let turns = request.messages.len();
    let completion = CompletionRequest {
        system: request.context,
        messages: request.messages,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    };

    match provider.complete(&completion).await {
        Ok(Some(content)) => {
            info!("Chat relay answered via {} ({turns} turns)", provider.name());
            Ok(ChatResponse { content })
        }
        Ok(None) => {
            warn!("Chat relay: {} returned no text", provider.name());
            Ok(ChatResponse {
                content: FALLBACK_REPLY.to_string(),
            })
        }
        Err(e) if e.mentions_any(BILLING_MARKERS) => {
            warn!("Chat relay billing failure: {e}");
            Err(AppError::PaymentRequired(
                "The chat assistant has hit its API usage limit. Please try again later or get in touch via the contact page.".to_string(),
            ))
        }
        Err(e) => {
            warn!("Chat relay via {} failed: {e}", provider.name());
            Err(AppError::Internal(
                "Failed to get a response from the assistant. Please try again.".to_string(),
            ))
        }
    }
}
