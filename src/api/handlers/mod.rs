pub mod health;
pub mod submissions;
pub mod submit;

use crate::api::error::AppError;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

/// CORS preflight for the browser-facing routes. Answers 204 for any
/// `OPTIONS` request, authorized or not.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                "Content-Type, X-Submissions-Password",
            ),
            (header::ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
    )
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
