//! GitHub GraphQL client for the viewer's contribution totals.

use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const CONTRIBUTIONS_QUERY: &str = "query { viewer { contributionsCollection { \
    contributionCalendar { totalContributions } restrictedContributionsCount } } }";

const USER_AGENT: &str = "portfolio-api";

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL API returned status {0}")]
    Status(u16),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    url: String,
    token: String,
}

impl GithubClient {
    pub fn new(client: Client, url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            token: token.into(),
        }
    }

    /// Public calendar contributions plus restricted (private) contributions.
    pub async fn total_contributions(&self) -> Result<u64, GithubError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .header(header::USER_AGENT, USER_AGENT)
            .json(&GraphqlRequest {
                query: CONTRIBUTIONS_QUERY,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        sum_contributions(&body)
    }
}

fn sum_contributions(body: &Value) -> Result<u64, GithubError> {
    let count = |pointer: &str| {
        body.pointer(pointer).and_then(Value::as_u64).ok_or_else(|| {
            let detail = body
                .pointer("/errors/0/message")
                .and_then(Value::as_str)
                .unwrap_or("missing or non-numeric field");
            GithubError::Shape(format!("{pointer}: {detail}"))
        })
    };

    let public = count("/data/viewer/contributionsCollection/contributionCalendar/totalContributions")?;
    let restricted = count("/data/viewer/contributionsCollection/restrictedContributionsCount")?;
    Ok(public + restricted)
}
