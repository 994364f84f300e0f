//! Axum route handler for the comparison API.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::comparison::generator::generate_comparison;
use crate::comparison::CompareRequest;
use crate::errors::{ApiJson, AppError};
use crate::state::AppState;

/// POST /api/compare
///
/// Returns `{jobTitle, company, comparisons: [...]}` exactly as the model produced it.
pub async fn handle_compare(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompareRequest>,
) -> Result<Json<Value>, AppError> {
    let comparison = generate_comparison(&state.match_providers, &request.job_description).await?;
    Ok(Json(comparison))
}
