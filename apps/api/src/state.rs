use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::comparison::PRIMARY_MODEL;
use crate::config::Config;
use crate::contributions::cache::ContributionCache;
use crate::contributions::github::GithubClient;
use crate::llm_client::{AnthropicClient, CompletionProvider, OpenAiCompatClient};
use crate::page_text::fetcher::PageFetcher;
use crate::relay;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Conversation relay backend. `None` when no OpenAI key is set.
    pub chat: Option<Arc<dyn CompletionProvider>>,
    /// Comparison backends in fallback order, primary first. Only configured
    /// providers are present, so an empty list means "nothing configured".
    pub match_providers: Vec<Arc<dyn CompletionProvider>>,
    pub page_fetcher: PageFetcher,
    pub github: Option<GithubClient>,
    pub contributions: ContributionCache,
}

impl AppState {
    /// Wires every client from config. All outbound calls share one HTTP client.
    pub fn from_config(config: &Config, http: Client) -> Self {
        let chat = config.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAiCompatClient::new(
                http.clone(),
                "openai",
                config.openai_base_url.clone(),
                key.clone(),
                relay::MODEL,
            )) as Arc<dyn CompletionProvider>
        });

        let mut match_providers: Vec<Arc<dyn CompletionProvider>> = Vec::new();
        if let Some(key) = &config.groq_api_key {
            match_providers.push(Arc::new(OpenAiCompatClient::new(
                http.clone(),
                "groq",
                config.groq_base_url.clone(),
                key.clone(),
                PRIMARY_MODEL,
            )));
        }
        if let Some(key) = &config.anthropic_api_key {
            match_providers.push(Arc::new(AnthropicClient::new(
                http.clone(),
                config.anthropic_base_url.clone(),
                key.clone(),
            )));
        }

        let github = config.github_token.as_ref().map(|token| {
            GithubClient::new(http.clone(), config.github_graphql_url.clone(), token.clone())
        });

        info!(
            "Providers: chat={}, comparison=[{}], github={}",
            chat.is_some(),
            match_providers
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", "),
            github.is_some()
        );

        Self {
            chat,
            match_providers,
            page_fetcher: PageFetcher::new(http),
            github,
            contributions: ContributionCache::default(),
        }
    }
}
