use crate::api::error::AppError;
use crate::config;
use crate::services::retrieval::{self, SubmissionPage};
use crate::utils::auth;
use axum::{
    Json,
    extract::Query,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

/// List recently archived submissions, most recent first.
///
/// Auth is decided before configuration is even looked at, so an
/// unconfigured store never leaks through an unauthorized request.
#[utoipa::path(
    get,
    path = "/submissions",
    params(
        ("limit" = Option<i64>, Query, description = "Listing page size, clamped to 1..=500")
    ),
    responses(
        (status = 200, description = "Recent submissions", body = SubmissionPage),
        (status = 401, description = "Invalid or missing password"),
        (status = 500, description = "Store not configured or listing failed")
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let expected = config::submissions_password();
    let provided = auth::provided_password(&headers, &params);
    if !auth::is_authorized(expected.as_deref(), provided.as_deref()) {
        return Err(AppError::Unauthorized);
    }

    let limit = params
        .get("limit")
        .and_then(|value| value.parse::<i64>().ok());
    let page = retrieval::recent_submissions(limit).await?;

    Ok((
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(page),
    )
        .into_response())
}
