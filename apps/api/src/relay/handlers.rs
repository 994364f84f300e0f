use axum::{extract::State, Json};

use crate::errors::{ApiJson, AppError};
use crate::relay::{relay_conversation, ChatRequest, ChatResponse};
use crate::state::AppState;

/// POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let provider = state.chat.as_deref().ok_or_else(|| {
        AppError::NotConfigured("The chat assistant is not configured right now.".to_string())
    })?;

    let response = relay_conversation(provider, request).await?;
    Ok(Json(response))
}
