pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::comparison::handlers::handle_compare;
use crate::contributions::handlers::handle_contributions;
use crate::page_text::handlers::handle_fetch_url;
use crate::relay::handlers::handle_chat;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/chat", post(handle_chat))
        .route("/api/fetch-url", post(handle_fetch_url))
        .route("/api/compare", post(handle_compare))
        .route("/api/contributions", get(handle_contributions))
        .with_state(state)
}
