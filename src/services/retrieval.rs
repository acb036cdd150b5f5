use crate::config::{MissingEnv, StorageConfig};
use crate::infrastructure;
use crate::services::key_namer::KEY_PREFIX;
use crate::services::storage::SubmissionStore;
use aws_sdk_s3::error::DisplayErrorContext;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Listing page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 100;
/// Largest listing page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 500;
/// Hard cap on objects fetched per request, independent of the page size.
pub const FETCH_CAP: usize = 100;

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Credentials or bucket unresolved; nothing was asked of the store.
    #[error("{0}")]
    NotConfigured(#[from] MissingEnv),
    /// The listing call failed; fatal for the whole request.
    #[error("{0}")]
    Store(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionPage {
    /// Most recent first; each record carries its source `key`.
    #[schema(value_type = Vec<Object>)]
    pub submissions: Vec<Value>,
    pub count: usize,
}

/// List and fetch recent submissions, resolving configuration from the
/// environment. A missing configuration and a failed listing are distinct
/// errors; an empty page is a success.
pub async fn recent_submissions(limit: Option<i64>) -> Result<SubmissionPage, RetrievalError> {
    let config = StorageConfig::from_env()?;
    collect_page(&infrastructure::storage::connect(&config).await, limit).await
}

/// The list-then-fetch flow against an already-connected store.
pub async fn collect_page(
    store: &SubmissionStore,
    limit: Option<i64>,
) -> Result<SubmissionPage, RetrievalError> {
    let listed = store
        .list(KEY_PREFIX, page_size(limit))
        .await
        .map_err(|err| RetrievalError::Store(format!("{}", DisplayErrorContext(err))))?;

    let mut selected: Vec<_> = listed
        .into_iter()
        .filter(|object| object.key.ends_with(".json"))
        .collect();
    // Stable sort: ties and entries without a timestamp keep listing order.
    selected.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    selected.truncate(FETCH_CAP);

    let mut submissions = Vec::with_capacity(selected.len());
    for object in &selected {
        match fetch_record(store, &object.key).await {
            Ok(record) => submissions.push(record),
            // One bad object must not fail the whole page.
            Err(err) => error!("failed to fetch object {}: {err:#}", object.key),
        }
    }

    Ok(SubmissionPage {
        count: submissions.len(),
        submissions,
    })
}

async fn fetch_record(store: &SubmissionStore, key: &str) -> anyhow::Result<Value> {
    let body = store.get_text(key).await?;
    let parsed: Value = serde_json::from_str(&body)?;

    let mut record = Map::new();
    record.insert("key".to_string(), Value::String(key.to_string()));
    if let Value::Object(fields) = parsed {
        // A `key` field stored in the object wins over ours.
        record.extend(fields);
    }
    Ok(Value::Object(record))
}

/// Clamp the requested page size to `[1, MAX_PAGE_SIZE]`.
pub fn page_size(limit: Option<i64>) -> i32 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_defaults_to_one_hundred() {
        assert_eq!(page_size(None), 100);
    }

    #[test]
    fn test_page_size_clamps_both_ends() {
        assert_eq!(page_size(Some(9999)), 500);
        assert_eq!(page_size(Some(500)), 500);
        assert_eq!(page_size(Some(250)), 250);
        assert_eq!(page_size(Some(1)), 1);
        assert_eq!(page_size(Some(0)), 1);
        assert_eq!(page_size(Some(-5)), 1);
    }
}
