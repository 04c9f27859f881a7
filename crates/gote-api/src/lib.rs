//! gote-api: HTTP API for the gote memo backend
//!
//! Provides the REST endpoints under `/api/memos`.
//! Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{app, start_server, AppState};
