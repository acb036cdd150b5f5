use crate::config::StorageConfig;
use crate::services::storage::SubmissionStore;
use aws_sdk_s3::config::{Credentials, Region};

/// Build a store scoped to the resolved credentials and endpoint.
///
/// A custom endpoint means an S3-compatible service (MinIO and friends),
/// which needs path-style addressing.
pub async fn connect(config: &StorageConfig) -> SubmissionStore {
    let mut loader = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .credentials_provider(Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "static",
        ));
    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint.clone());
    }
    let aws_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&aws_config);
    if config.endpoint.is_some() {
        builder = builder.force_path_style(true);
    }

    SubmissionStore::new(
        aws_sdk_s3::Client::from_conf(builder.build()),
        config.bucket.clone(),
    )
}
