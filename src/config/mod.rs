use std::env;
use thiserror::Error;

/// Bucket holding archived submissions.
pub const BUCKET_VAR: &str = "S3_BUCKET_NAME";
/// Region candidates: standard AWS variable first, legacy deploy prefix second.
pub const REGION_VARS: &[&str] = &["AWS_REGION", "ASSURE_AWS_REGION"];
/// Access-key candidates, same precedence as the region chain.
pub const ACCESS_KEY_VARS: &[&str] = &["AWS_ACCESS_KEY_ID", "ASSURE_AWS_ACCESS_KEY_ID"];
/// Secret-key candidates, same precedence as the region chain.
pub const SECRET_KEY_VARS: &[&str] = &["AWS_SECRET_ACCESS_KEY", "ASSURE_AWS_SECRET_ACCESS_KEY"];
/// Custom endpoint for S3-compatible stores (MinIO and friends).
pub const ENDPOINT_VAR: &str = "S3_ENDPOINT";
/// Shared secret gating the retrieval endpoint.
pub const PASSWORD_VAR: &str = "SUBMISSIONS_PASSWORD";

pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// Required variables that did not resolve, reported by their primary name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required environment variables: {}", .missing.join(", "))]
pub struct MissingEnv {
    pub missing: Vec<&'static str>,
}

/// Store configuration, resolved fresh for every call. Nothing here is
/// cached across invocations.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: Option<String>,
}

impl StorageConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, MissingEnv> {
        Self::resolve(|name| env::var(name).ok())
    }

    /// Resolve through an injectable lookup. Each logical value walks its
    /// candidate chain in order; empty values count as unset.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MissingEnv> {
        let first = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| lookup(name).filter(|value| !value.is_empty()))
        };

        let bucket = first(&[BUCKET_VAR]);
        let access_key_id = first(ACCESS_KEY_VARS);
        let secret_access_key = first(SECRET_KEY_VARS);

        match (bucket, access_key_id, secret_access_key) {
            (Some(bucket), Some(access_key_id), Some(secret_access_key)) => Ok(Self {
                bucket,
                region: first(REGION_VARS).unwrap_or_else(|| DEFAULT_REGION.to_string()),
                access_key_id,
                secret_access_key,
                endpoint: first(&[ENDPOINT_VAR]),
            }),
            (bucket, access_key_id, secret_access_key) => {
                let mut missing = Vec::new();
                if bucket.is_none() {
                    missing.push(BUCKET_VAR);
                }
                if access_key_id.is_none() {
                    missing.push(ACCESS_KEY_VARS[0]);
                }
                if secret_access_key.is_none() {
                    missing.push(SECRET_KEY_VARS[0]);
                }
                Err(MissingEnv { missing })
            }
        }
    }
}

/// The retrieval password. Empty counts as unset, so the gate fails closed.
pub fn submissions_password() -> Option<String> {
    env::var(PASSWORD_VAR).ok().filter(|value| !value.is_empty())
}
