//! HTTP API handlers
//!
//! Request handlers for memo CRUD. Each handler only translates between
//! HTTP and [`gote_core::MemoStore`]; the store owns every rule.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gote_core::Memo;

use crate::error::{ApiError, Result};
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Create/update payload
///
/// Missing fields default to empty strings, so a request without a
/// title is rejected by the store's validation.
#[derive(Debug, Default, Deserialize)]
pub struct MemoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Confirmation body for deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Generic API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse a memo id path segment; ids are positive 32-bit integers
/// written as plain decimal digits (no sign)
fn parse_id(raw: &str) -> Result<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidId(raw.to_string()));
    }

    match raw.parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidId(raw.to_string())),
    }
}

/// Decode a memo payload regardless of the request's Content-Type
fn parse_body(body: &[u8]) -> Result<MemoRequest> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid JSON body: {}", e)))
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint; fails when the database does not answer
pub async fn health(State(state): State<AppState>) -> Result<&'static str> {
    let live = state
        .store
        .count()
        .map_err(ApiError::storage("Database unavailable"))?;

    debug!("Health check: {} live memos", live);
    Ok("OK")
}

/// List all memos
pub async fn list_memos(State(state): State<AppState>) -> Result<Json<Vec<Memo>>> {
    let memos = state
        .store
        .find_all()
        .map_err(ApiError::storage("Failed to retrieve memos"))?;

    debug!("Returning {} memos", memos.len());
    Ok(Json(memos))
}

/// Create a memo
pub async fn create_memo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Memo>)> {
    let req = parse_body(&body)?;

    let memo = state
        .store
        .create(&req.title, &req.content)
        .map_err(ApiError::storage("Failed to create memo"))?;

    info!("Created memo {}", memo.id);
    Ok((StatusCode::CREATED, Json(memo)))
}

/// Get a memo by id
pub async fn get_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Memo>> {
    let id = parse_id(&id)?;

    let memo = state
        .store
        .find_by_id(id)
        .map_err(ApiError::storage("Failed to retrieve memo"))?;

    Ok(Json(memo))
}

/// Replace a memo's title and content
///
/// The memo is looked up before the body is parsed, so a missing memo
/// reports 404 even when the payload is malformed.
pub async fn update_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Memo>> {
    let id = parse_id(&id)?;

    state
        .store
        .find_by_id(id)
        .map_err(ApiError::storage("Failed to retrieve memo for update"))?;

    let req = parse_body(&body)?;

    let memo = state
        .store
        .update(id, &req.title, &req.content)
        .map_err(ApiError::storage("Failed to update memo"))?;

    info!("Updated memo {}", memo.id);
    Ok(Json(memo))
}

/// Soft-delete a memo
pub async fn delete_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    state
        .store
        .delete(id)
        .map_err(ApiError::storage("Failed to delete memo"))?;

    info!("Deleted memo {}", id);
    Ok(Json(MessageResponse {
        message: "Memo deleted successfully".to_string(),
    }))
}
