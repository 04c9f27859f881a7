//! Error types for gote-api
//!
//! Every error leaves the API as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::handlers::ErrorResponse;

/// gote-api のエラー型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid memo ID: {0}")]
    InvalidId(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Memo not found: {0}")]
    NotFound(u32),

    #[error("{action}: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: gote_core::Error,
    },
}

impl ApiError {
    /// Classify a storage error raised while performing `action`
    ///
    /// Validation failures become 400 and missing memos 404; anything
    /// else is reported as a 500 carrying `action` as its message.
    pub fn storage(action: &'static str) -> impl FnOnce(gote_core::Error) -> Self {
        move |err| match err {
            gote_core::Error::Validation(msg) => Self::InvalidRequest(msg),
            gote_core::Error::MemoNotFound(id) => Self::NotFound(id),
            source => Self::Storage { action, source },
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::InvalidId(_) => "Invalid memo ID".to_string(),
            Self::InvalidRequest(msg) => msg.clone(),
            Self::NotFound(_) => "Memo not found".to_string(),
            Self::Storage { action, .. } => action.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;
