//! Comparison generation builds the prompt, walks the provider fallback
//! chain and validates the model's JSON.
//!
//! Flow: validate JD → build prompt → primary provider → (secondary provider)
//!       → strip fences → parse JSON → require `comparisons` array.
//!
//! Providers are tried strictly in order, each to completion before the next.
//! A later provider is only reached when the earlier one failed or produced
//! no text; the earlier failure never reaches the caller.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::comparison::prompts::{COMPARISON_PROMPT_TEMPLATE, COMPARISON_SYSTEM};
use crate::comparison::{MAX_JOB_DESCRIPTION_CHARS, MIN_JOB_DESCRIPTION_CHARS};
use crate::errors::AppError;
use crate::llm_client::{
    strip_json_fences, ChatMessage, CompletionProvider, CompletionRequest, LlmError,
};
use crate::page_text::extract::truncate_chars;

const MAX_TOKENS: u32 = 2048;
const TEMPERATURE: f32 = 0.7;

const BILLING_MARKERS: &[&str] = &["credit", "billing", "quota"];

/// Runs the full generation for one job description.
///
/// `providers` is the ordered list of configured backends (primary first);
/// an empty list means no credential is configured at all.
pub async fn generate_comparison(
    providers: &[Arc<dyn CompletionProvider>],
    job_description: &str,
) -> Result<Value, AppError> {
    let job_description = job_description.trim();
    if job_description.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(AppError::Validation(format!(
            "Please provide a job description of at least {MIN_JOB_DESCRIPTION_CHARS} characters."
        )));
    }

    if providers.is_empty() {
        return Err(AppError::NotConfigured(
            "The role comparison isn't available right now: no AI provider is configured."
                .to_string(),
        ));
    }

    let request = build_request(job_description);
    let text = first_completion(providers, &request).await?;
    parse_comparison(&text)
}

fn build_request(job_description: &str) -> CompletionRequest {
    let prompt = COMPARISON_PROMPT_TEMPLATE.replace(
        "{job_description}",
        truncate_chars(job_description, MAX_JOB_DESCRIPTION_CHARS),
    );

    CompletionRequest {
        system: COMPARISON_SYSTEM.to_string(),
        messages: vec![ChatMessage::user(prompt)],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

/// Returns the first non-empty completion. If every provider came up empty,
/// the outcome of the final attempt decides the status: a billing-flavoured
/// error is 402, anything else 500.
async fn first_completion(
    providers: &[Arc<dyn CompletionProvider>],
    request: &CompletionRequest,
) -> Result<String, AppError> {
    let mut last_error: Option<LlmError> = None;

    for provider in providers {
        match provider.complete(request).await {
            Ok(Some(text)) => {
                info!("Comparison generated via {}", provider.name());
                return Ok(text);
            }
            Ok(None) => {
                warn!("{} returned no content, trying next provider", provider.name());
                last_error = None;
            }
            Err(e) => {
                warn!("{} failed, trying next provider: {e}", provider.name());
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if e.mentions_any(BILLING_MARKERS) => Err(AppError::PaymentRequired(
            "The role comparison has run out of AI credit for now. Please try again later."
                .to_string(),
        )),
        _ => Err(AppError::Internal(
            "Failed to generate analysis. Please try again.".to_string(),
        )),
    }
}

/// Parses the model reply, tolerating Markdown code fences. The object is
/// returned verbatim once it carries a `comparisons` array.
pub fn parse_comparison(text: &str) -> Result<Value, AppError> {
    let value: Value = serde_json::from_str(strip_json_fences(text)).map_err(|e| {
        warn!("Comparison reply was not valid JSON: {e}");
        AppError::UnprocessableEntity(
            "The analysis came back in an unexpected format. Please try again.".to_string(),
        )
    })?;

    if !value.get("comparisons").is_some_and(Value::is_array) {
        return Err(AppError::UnprocessableEntity(
            "The analysis was missing its comparisons. Please try again.".to_string(),
        ));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::{Reply, StubProvider};
    use serde_json::json;

    const JD: &str = "Senior Rust Engineer at Ferrous Ltd. 5+ years building distributed systems.";

    const VALID_REPLY: &str = r#"{
        "jobTitle": "Senior Rust Engineer",
        "company": "Ferrous Ltd",
        "comparisons": [
            {
                "category": "Rust",
                "garethTrait": "Ships Rust services in production",
                "otherTrait": "Has opinions about the borrow checker",
                "wittyComment": "Only one of them has won the argument."
            }
        ]
    }"#;

    fn chain(providers: &[&Arc<StubProvider>]) -> Vec<Arc<dyn CompletionProvider>> {
        providers
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn CompletionProvider>)
            .collect()
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = Arc::new(StubProvider::text("groq", VALID_REPLY));
        let secondary = Arc::new(StubProvider::text("anthropic", VALID_REPLY));

        let value = generate_comparison(&chain(&[&primary, &secondary]), JD)
            .await
            .unwrap();

        assert_eq!(value["jobTitle"], "Senior Rust Engineer");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back_to_secondary() {
        let primary = Arc::new(StubProvider::failing("groq", "rate limit reached"));
        let secondary = Arc::new(StubProvider::text(
            "anthropic",
            &format!("```json\n{VALID_REPLY}\n```"),
        ));

        let value = generate_comparison(&chain(&[&primary, &secondary]), JD)
            .await
            .unwrap();

        assert_eq!(value["company"], "Ferrous Ltd");
        assert_eq!(value["comparisons"].as_array().map(Vec::len), Some(1));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_primary_empty_reply_falls_back_to_secondary() {
        let primary = Arc::new(StubProvider::new("groq", Reply::Empty));
        let secondary = Arc::new(StubProvider::text("anthropic", VALID_REPLY));

        assert!(generate_comparison(&chain(&[&primary, &secondary]), JD)
            .await
            .is_ok());
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_secondary_only_is_used_when_primary_unconfigured() {
        let secondary = Arc::new(StubProvider::text("anthropic", VALID_REPLY));
        assert!(generate_comparison(&chain(&[&secondary]), JD).await.is_ok());
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_providers_is_not_configured() {
        let err = generate_comparison(&[], JD).await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_short_description_rejected_before_any_call() {
        let primary = Arc::new(StubProvider::text("groq", VALID_REPLY));
        let secondary = Arc::new(StubProvider::text("anthropic", VALID_REPLY));

        let err = generate_comparison(&chain(&[&primary, &secondary]), "Short job")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(primary.calls() + secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_short_description_rejected_even_without_providers() {
        let err = generate_comparison(&[], "   too short   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_422() {
        let primary = Arc::new(StubProvider::text("groq", "not json at all"));
        let err = generate_comparison(&chain(&[&primary]), JD).await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_reply_without_comparisons_array_is_422() {
        let primary = Arc::new(StubProvider::text(
            "groq",
            r#"{"jobTitle":"x","company":"y","comparisons":"none"}"#,
        ));
        let err = generate_comparison(&chain(&[&primary]), JD).await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_final_credit_error_is_402() {
        let primary = Arc::new(StubProvider::failing("groq", "service unavailable"));
        let secondary = Arc::new(StubProvider::failing(
            "anthropic",
            "Your credit balance is too low",
        ));

        let err = generate_comparison(&chain(&[&primary, &secondary]), JD)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PaymentRequired(_)));
    }

    #[tokio::test]
    async fn test_all_providers_failing_is_500() {
        let primary = Arc::new(StubProvider::failing("groq", "boom"));
        let secondary = Arc::new(StubProvider::new("anthropic", Reply::Empty));

        let err = generate_comparison(&chain(&[&primary, &secondary]), JD)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_prompt_truncates_job_description() {
        let primary = Arc::new(StubProvider::text("groq", VALID_REPLY));
        let long_jd = "x".repeat(MAX_JOB_DESCRIPTION_CHARS + 500);

        generate_comparison(&chain(&[&primary]), &long_jd)
            .await
            .unwrap();

        let sent = primary.last_request().unwrap();
        assert_eq!(sent.system, COMPARISON_SYSTEM);
        assert_eq!(sent.max_tokens, 2048);
        assert_eq!(sent.messages.len(), 1);
        let prompt = &sent.messages[0].content;
        assert!(prompt.ends_with(&"x".repeat(MAX_JOB_DESCRIPTION_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_JOB_DESCRIPTION_CHARS + 1)));
    }

    #[test]
    fn test_parse_comparison_returns_object_verbatim() {
        let reply = r#"{"jobTitle":"this role","company":"this company","comparisons":[],"extra":1}"#;
        assert_eq!(
            parse_comparison(reply).unwrap(),
            json!({"jobTitle":"this role","company":"this company","comparisons":[],"extra":1})
        );
    }
}
