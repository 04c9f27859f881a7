//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    routing::get,
    Router,
};

use crate::handlers::{create_memo, delete_memo, get_memo, health, list_memos, update_memo};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Memo collection
        .route("/api/memos", get(list_memos).post(create_memo))
        // Single memo
        .route(
            "/api/memos/{id}",
            get(get_memo).put(update_memo).delete(delete_memo),
        )
}
