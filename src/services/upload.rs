use crate::config::{MissingEnv, StorageConfig};
use crate::infrastructure;
use crate::services::key_namer;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::RequestId;
use aws_sdk_s3::operation::put_object::PutObjectError;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

/// Reported as `Skipped.reason` when required credentials are unresolved.
pub const MISSING_ENV: &str = "missing_env";

/// What happened to one archival attempt. Exactly one variant per call.
///
/// Store failures are data here, never propagated faults: the caller decides
/// whether archival is best-effort (log and continue) or blocking.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UploadOutcome {
    Uploaded {
        key: String,
    },
    Skipped {
        reason: &'static str,
        missing: Vec<&'static str>,
    },
    Failed {
        error: String,
        details: FailureDetails,
    },
}

/// Diagnostics carried by a failed put.
#[derive(Debug, Clone, Serialize)]
pub struct FailureDetails {
    pub code: Option<String>,
    pub message: Option<String>,
    pub request_id: Option<String>,
    pub http_status: Option<u16>,
    pub region: String,
    pub bucket: String,
    pub endpoint: Option<String>,
}

/// Archive a submission, resolving configuration from the environment.
///
/// Missing credentials are a normal outcome, not an error: the put is
/// skipped without contacting the store, and the missing variable names are
/// reported for the caller to inspect.
pub async fn archive(submission: &Value) -> UploadOutcome {
    match StorageConfig::from_env() {
        Ok(config) => archive_with(&config, submission).await,
        Err(MissingEnv { missing }) => {
            info!("📦 archival skipped, not configured: {}", missing.join(", "));
            UploadOutcome::Skipped {
                reason: MISSING_ENV,
                missing,
            }
        }
    }
}

/// Archive against an already-resolved configuration.
pub async fn archive_with(config: &StorageConfig, submission: &Value) -> UploadOutcome {
    let body = match serde_json::to_string_pretty(submission) {
        Ok(body) => body,
        Err(err) => {
            error!("❌ submission not serializable: {err}");
            return UploadOutcome::Failed {
                error: err.to_string(),
                details: FailureDetails::for_config(config),
            };
        }
    };

    let store = infrastructure::storage::connect(config).await;
    let key = key_namer::make_key(submission, Utc::now(), &mut rand::thread_rng());

    match store.put_json(&key, body).await {
        Ok(_) => {
            info!("✅ submission archived: {key}");
            UploadOutcome::Uploaded { key }
        }
        Err(err) => {
            let details = FailureDetails::from_put_error(config, &err);
            let error = format!("{}", DisplayErrorContext(err));
            error!("❌ archival failed: {error}");
            UploadOutcome::Failed { error, details }
        }
    }
}

impl FailureDetails {
    fn for_config(config: &StorageConfig) -> Self {
        Self {
            code: None,
            message: None,
            request_id: None,
            http_status: None,
            region: config.region.clone(),
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    fn from_put_error(config: &StorageConfig, err: &SdkError<PutObjectError>) -> Self {
        Self {
            code: err.code().map(str::to_string),
            message: err.message().map(str::to_string),
            request_id: err.request_id().map(str::to_string),
            http_status: err.raw_response().map(|response| response.status().as_u16()),
            ..Self::for_config(config)
        }
    }
}
