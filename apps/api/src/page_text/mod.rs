//! Page-Text Fetcher: downloads a job posting page and reduces it to plain
//! text the visitor can feed into the match generator.
//!
//! Every failure message points the visitor at pasting the description
//! directly, which the front-end offers as the alternative input.

pub mod extract;
pub mod fetcher;
pub mod handlers;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::page_text::extract::{html_to_text, truncate_chars};
use crate::page_text::fetcher::{FetchError, PageFetcher};

/// Below this many characters the page is treated as unusable.
pub const MIN_TEXT_CHARS: usize = 50;
/// Longest text returned to the caller.
pub const MAX_TEXT_CHARS: usize = 15_000;

#[derive(Debug, Deserialize)]
pub struct FetchUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct FetchUrlResponse {
    pub text: String,
}

/// Accepts only absolute `http`/`https` URLs.
pub fn parse_page_url(raw: &str) -> Result<Url, AppError> {
    let invalid = || {
        AppError::Validation(
            "Please enter a valid http(s) URL, or paste the job description instead.".to_string(),
        )
    };

    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(invalid()),
    }
}

pub async fn fetch_page_text(
    fetcher: &PageFetcher,
    raw_url: &str,
) -> Result<FetchUrlResponse, AppError> {
    let url = parse_page_url(raw_url)?;
    let host = url.host_str().unwrap_or_default().to_string();

    let html = fetcher.fetch(url).await.map_err(|e| {
        warn!("Page fetch from {host} failed: {e}");
        match e {
            FetchError::Timeout => AppError::Timeout(
                "That page took too long to respond. Please paste the job description instead."
                    .to_string(),
            ),
            FetchError::Status(status) => AppError::BadGateway(format!(
                "Couldn't load that page (status {status}). Please paste the job description instead."
            )),
            FetchError::Network(_) => AppError::BadGateway(
                "Couldn't reach that page. Please paste the job description instead.".to_string(),
            ),
        }
    })?;

    let text = html_to_text(&html);
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(AppError::UnprocessableEntity(
            "Couldn't find enough readable text on that page. Please paste the job description instead."
                .to_string(),
        ));
    }

    info!("Extracted {chars} chars of text from {host}");
    Ok(FetchUrlResponse {
        text: truncate_chars(&text, MAX_TEXT_CHARS).to_string(),
    })
}
