//! OpenAI-compatible `/chat/completions` client. Serves both OpenAI and Groq,
//! which share the same request and response shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    api_error_message, non_empty, CompletionProvider, CompletionRequest, LlmError, Role,
};

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, PartialEq, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    label: &'static str,
    base_url: String,
    api_key: String,
    model: &'static str,
}

impl OpenAiCompatClient {
    pub fn new(
        client: Client,
        label: &'static str,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: &'static str,
    ) -> Self {
        Self {
            client,
            label,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model,
        }
    }
}

/// Leading `system` entry carrying `request.system`, then every caller message
/// in its original order.
fn wire_messages(request: &CompletionRequest) -> Vec<WireMessage<'_>> {
    std::iter::once(WireMessage {
        role: "system",
        content: &request.system,
    })
    .chain(request.messages.iter().map(|m| WireMessage {
        role: match m.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        },
        content: &m.content,
    }))
    .collect()
}

#[async_trait]
impl CompletionProvider for OpenAiCompatClient {
    fn name(&self) -> &str {
        self.label
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError> {
        let body = ChatCompletionBody {
            model: self.model,
            messages: wire_messages(request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        debug!(
            "{} completion succeeded: {} choice(s)",
            self.label,
            completion.choices.len()
        );

        Ok(non_empty(
            completion
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content),
        ))
    }
}
