/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError / RepoError / UpstreamError を統一的に変換
 *
 * Body shape: {"error": {"code": <int>, "message": <string>}}
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::UpstreamError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// Status decided elsewhere (policy service, upstream engine).
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    /// Known server-side failure whose message is safe to return.
    #[error("{0}")]
    Internal(String),
    /// Unexpected fault; detail stays in the server log.
    #[error("internal server error")]
    Unexpected,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Status { status, .. } => *status,
            AppError::Internal(_) | AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Renders the standard error body for any status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: ErrorBody {
            code: status.as_u16(),
            message: message.into(),
        },
    };

    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "config store failure");
        AppError::internal(format!("config query failed: {e}"))
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Status { status, message } => AppError::with_status(status, message),
            UpstreamError::Transport(_) | UpstreamError::Decode(_) => {
                tracing::error!(error = ?e, "upstream engine failure");
                AppError::Unexpected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_numeric_code_and_message() {
        let response = AppError::bad_request("Invalid JSON format").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": { "code": 400, "message": "Invalid JSON format" } })
        );
    }

    #[test]
    fn unexpected_faults_do_not_leak_detail() {
        assert_eq!(AppError::Unexpected.to_string(), "internal server error");
        assert_eq!(
            AppError::Unexpected.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
