pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;
pub mod utils;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::health_check,
        api::handlers::submissions::list_submissions,
        api::handlers::submit::archive_submission,
    ),
    components(
        schemas(
            api::handlers::health::HealthResponse,
            services::retrieval::SubmissionPage,
        )
    ),
    tags(
        (name = "submissions", description = "Form submission archive endpoints"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn create_app() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/submissions",
            get(api::handlers::submissions::list_submissions)
                .options(api::handlers::preflight)
                .fallback(api::handlers::method_not_allowed),
        )
        .route(
            "/submit",
            post(api::handlers::submit::archive_submission)
                .options(api::handlers::preflight)
                .fallback(api::handlers::method_not_allowed),
        )
}
