use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Application configuration loaded from environment variables.
///
/// Provider credentials are all optional: a missing key does not stop startup,
/// the affected endpoint answers 503 instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub github_token: Option<String>,
    pub openai_base_url: String,
    pub groq_base_url: String,
    pub anthropic_base_url: String,
    pub github_graphql_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            groq_api_key: optional_env("GROQ_API_KEY"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            github_token: optional_env("GITHUB_TOKEN"),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            groq_base_url: env_or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            anthropic_base_url: env_or("ANTHROPIC_BASE_URL", DEFAULT_ANTHROPIC_BASE_URL),
            github_graphql_url: env_or("GITHUB_GRAPHQL_URL", DEFAULT_GITHUB_GRAPHQL_URL),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an optional variable; unset and blank values are both `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key)
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    /// A config with no credentials, pointing every upstream at `base_url`.
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            openai_api_key: None,
            groq_api_key: None,
            anthropic_api_key: None,
            github_token: None,
            openai_base_url: base_url.to_string(),
            groq_base_url: base_url.to_string(),
            anthropic_base_url: base_url.to_string(),
            github_graphql_url: format!("{base_url}/graphql"),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
