// Candidate-Match Generator: job description in, structured comparison out.
// Provider calls go through llm_client; this module only owns the prompt,
// the provider fallback order and the reply parsing.

pub mod generator;
pub mod handlers;
pub mod prompts;

use serde::Deserialize;

/// Primary (free tier, rate limited) provider model, served by Groq.
pub const PRIMARY_MODEL: &str = "llama-3.3-70b-versatile";

/// Shortest trimmed job description worth analysing.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 20;
/// Longest slice of the job description placed in the prompt.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 15_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub job_description: String,
}
