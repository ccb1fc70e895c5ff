// Object storage for photo uploads

pub mod gcs;

pub use gcs::GcsBackend;

use std::time::Duration;

use crate::error::AppResult;

/// Content type of the originals clients upload.
pub const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// Lifetime of a signed upload URL.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(15 * 60);

/// Bucket where clients upload the original photos.
#[tonic::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Signed URL the client PUTs the photo bytes to.
    async fn signed_upload_url(&self, object: &str, content_type: &str) -> AppResult<String>;

    /// Deletes an object.
    async fn delete(&self, object: &str) -> AppResult<()>;

    /// Bucket name
    fn bucket(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url_ttl() {
        assert_eq!(UPLOAD_URL_TTL.as_secs(), 900);
    }
}
