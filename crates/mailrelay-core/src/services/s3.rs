/// S3 storage service
use crate::error::RelayError;
use async_trait::async_trait;

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RelayError>;
}

/// S3 storage service implementation
pub struct S3StorageService {
    client: aws_sdk_s3::Client,
}

impl S3StorageService {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RelayError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| RelayError::Storage(format!("S3 download failed: {}", e)))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| RelayError::Storage(format!("Failed to read S3 object body: {}", e)))?
            .into_bytes()
            .to_vec();

        tracing::info!(
            "Downloaded from s3://{}/{} ({} bytes)",
            bucket,
            key,
            data.len()
        );
        Ok(data)
    }
}
