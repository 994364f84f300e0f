//! Contribution Counter: total GitHub contributions, cached for an hour.

pub mod cache;
pub mod github;
pub mod handlers;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};

use crate::contributions::cache::{ContributionCache, ContributionSnapshot};
use crate::contributions::github::GithubClient;
use crate::errors::AppError;

/// Sent on every successful response, cached or fresh.
pub const CACHE_CONTROL_VALUE: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// Serves from `cache` while fresh at `now`; otherwise asks GitHub and
/// replaces the cache with the new total stamped at `now`.
pub async fn current_contributions(
    github: Option<&GithubClient>,
    cache: &ContributionCache,
    now: DateTime<Utc>,
) -> Result<ContributionSnapshot, AppError> {
    if let Some(snapshot) = cache.get(now) {
        debug!("Contribution count served from cache");
        return Ok(snapshot);
    }

    let github = github.ok_or_else(|| {
        AppError::NotConfigured("GitHub contributions are not configured.".to_string())
    })?;

    let total = github.total_contributions().await.map_err(|e| {
        warn!("GitHub contribution fetch failed: {e}");
        AppError::Internal("Failed to fetch GitHub contributions.".to_string())
    })?;

    let snapshot = ContributionSnapshot {
        total_contributions: total,
        fetched_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    cache.store(snapshot.clone(), now);
    info!("Contribution count refreshed: {total}");

    Ok(snapshot)
}
