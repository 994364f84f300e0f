use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::contributions::{current_contributions, CACHE_CONTROL_VALUE};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/contributions
pub async fn handle_contributions(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot =
        current_contributions(state.github.as_ref(), &state.contributions, Utc::now()).await?;

    Ok(([(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)], Json(snapshot)).into_response())
}
