use axum::{extract::State, Json};

use crate::errors::{ApiJson, AppError};
use crate::page_text::{fetch_page_text, FetchUrlRequest, FetchUrlResponse};
use crate::state::AppState;

/// POST /api/fetch-url
///
/// Fetches the page server-side (10s deadline) and returns its readable text.
pub async fn handle_fetch_url(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FetchUrlRequest>,
) -> Result<Json<FetchUrlResponse>, AppError> {
    let response = fetch_page_text(&state.page_fetcher, &request.url).await?;
    Ok(Json(response))
}
