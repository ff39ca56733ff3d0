pub mod config;
pub mod dir;
pub mod health;
pub mod vector;

use axum::http::StatusCode;
use axum::response::Response;

use crate::error::error_response;

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not found")
}
