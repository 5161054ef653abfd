//! Object store seam
//!
//! The pipeline talks to storage through the [`ObjectStore`] trait so
//! tests can substitute an in-memory implementation. The production
//! implementation wraps the AWS S3 client.

use crate::config::GateConfig;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("put object failed: {0}")]
    Put(String),
}

/// Result of a single object write
#[derive(Debug, Clone, Default)]
pub struct PutOutcome {
    /// Store-assigned version token; absent when bucket versioning is off
    pub version_id: Option<String>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<PutOutcome, StoreError>;
}

/// S3-backed object store
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    pub fn new(aws: &aws_config::SdkConfig, config: &GateConfig) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(aws);
        if let Some(endpoint) = &config.s3_endpoint {
            // S3-compatible stores (MinIO, LocalStack) expect path-style
            // addressing.
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<PutOutcome, StoreError> {
        let output = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::Put(e.to_string()))?;

        Ok(PutOutcome {
            version_id: output.version_id().map(|v| v.to_string()),
        })
    }
}

/// Join the configured key prefix with a file name.
///
/// An empty prefix yields the bare file name, never a leading slash.
pub fn object_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}
