use crate::services::upload::{self, UploadOutcome};
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Archive one submission into the bucket.
///
/// Archival is best-effort: an unconfigured store still answers 2xx with a
/// `skipped` outcome so the surrounding form flow is never broken. Only a
/// put the store actively rejected maps to an error status.
#[utoipa::path(
    post,
    path = "/submit",
    responses(
        (status = 201, description = "Submission archived"),
        (status = 200, description = "Archival skipped, store not configured"),
        (status = 502, description = "The store rejected the put")
    ),
    tag = "submissions"
)]
pub async fn archive_submission(Json(submission): Json<Value>) -> Response {
    let outcome = upload::archive(&submission).await;
    let status = match &outcome {
        UploadOutcome::Uploaded { .. } => StatusCode::CREATED,
        UploadOutcome::Skipped { .. } => StatusCode::OK,
        UploadOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(outcome),
    )
        .into_response()
}
