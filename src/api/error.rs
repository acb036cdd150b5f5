use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::retrieval::RetrievalError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("S3 not configured: {0}")]
    Configuration(String),

    #[error("Failed to fetch submissions: {0}")]
    Store(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl From<RetrievalError> for AppError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::NotConfigured(err) => {
                AppError::Configuration(format!("{} must be set", err.missing.join(", ")))
            }
            RetrievalError::Store(message) => AppError::Store(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized", "message": "Invalid or missing password" }),
            ),
            AppError::Configuration(message) => {
                tracing::error!("retrieval not configured: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "S3 not configured", "message": message }),
                )
            }
            AppError::Store(message) => {
                tracing::error!("submissions fetch failed: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to fetch submissions", "message": message }),
                )
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "message": "Method Not Allowed" }),
            ),
        };

        (
            status,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(body),
        )
            .into_response()
    }
}
