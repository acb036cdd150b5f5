use anyhow::Result;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectOutput};
use aws_sdk_s3::primitives::{ByteStream, DateTime};

/// Thin wrapper over the S3 client, scoped to one bucket. The three
/// operations here are the only store capabilities the service consumes.
pub struct SubmissionStore {
    client: Client,
    bucket: String,
}

/// One entry from a bucket listing.
#[derive(Debug, Clone)]
pub struct ListedObject {
    pub key: String,
    pub last_modified: Option<DateTime>,
}

impl SubmissionStore {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub async fn put_json(
        &self,
        key: &str,
        body: String,
    ) -> Result<PutObjectOutput, SdkError<PutObjectError>> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body.into_bytes()))
            .content_type(mime::APPLICATION_JSON.as_ref())
            .send()
            .await
    }

    /// One listing page under `prefix`. Entries without a key are dropped.
    pub async fn list(
        &self,
        prefix: &str,
        max_keys: i32,
    ) -> Result<Vec<ListedObject>, SdkError<ListObjectsV2Error>> {
        let page = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(max_keys)
            .send()
            .await?;

        Ok(page
            .contents()
            .iter()
            .filter_map(|object| {
                Some(ListedObject {
                    key: object.key()?.to_string(),
                    last_modified: object.last_modified().cloned(),
                })
            })
            .collect())
    }

    pub async fn get_text(&self, key: &str) -> Result<String> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;

        let bytes = object.body.collect().await?.into_bytes();
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
