use google_cloud_storage::{
    client::{Client, ClientConfig},
    http::objects::delete::DeleteObjectRequest,
    sign::{SignedURLMethod, SignedURLOptions},
};

use crate::error::{AppError, AppResult};

use super::{StorageBackend, UPLOAD_URL_TTL};

pub struct GcsBackend {
    client: Client,
    bucket: String,
}

impl GcsBackend {
    pub async fn new(bucket: String) -> AppResult<Self> {
        let config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| AppError::Storage(format!("GCS auth failed: {}", e)))?;
        let client = Client::new(config);
        Ok(Self { client, bucket })
    }
}

#[tonic::async_trait]
impl StorageBackend for GcsBackend {
    async fn signed_upload_url(&self, object: &str, content_type: &str) -> AppResult<String> {
        let url = self
            .client
            .signed_url(
                &self.bucket,
                object,
                None,
                None,
                SignedURLOptions {
                    method: SignedURLMethod::PUT,
                    expires: UPLOAD_URL_TTL,
                    content_type: Some(content_type.to_string()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| AppError::Storage(format!("GCS signing failed: {}", e)))?;

        tracing::info!("GCS upload URL signed: bucket={}, object={}", self.bucket, object);
        Ok(url)
    }

    async fn delete(&self, object: &str) -> AppResult<()> {
        self.client
            .delete_object(&DeleteObjectRequest {
                bucket: self.bucket.clone(),
                object: object.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| AppError::Storage(format!("GCS delete failed: {}", e)))?;

        tracing::info!("GCS delete: bucket={}, object={}", self.bucket, object);
        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
