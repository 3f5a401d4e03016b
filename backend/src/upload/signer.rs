//! Presigned PUT URL signing against the object store

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::{presigning::PresigningConfig, types::ChecksumAlgorithm, Client as S3Client};
use chrono::{DateTime, Utc};

use super::{ObjectKey, UploadError, UploadResult};

/// Constraints a presigned PUT URL is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedPutRequest {
    /// Object key the URL may write to
    pub key: ObjectKey,
    /// Declared `Content-Type` of the upload
    pub content_type: String,
    /// Declared `Content-Length` of the upload
    pub content_length: i64,
    /// Base64 SHA-256 the uploaded body must match
    pub checksum_sha256: String,
    /// Validity window of the URL
    pub expires_in: Duration,
}

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for PUT operations
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Issues time-boxed write capabilities for single objects
#[async_trait::async_trait]
pub trait PresignedPutSigner: Send + Sync {
    /// Signs a PUT request for exactly one object
    async fn presign_put(&self, request: PresignedPutRequest) -> UploadResult<PresignedUrl>;
}

/// S3 signer for presigned PUT URLs
pub struct S3PresignedPutSigner {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3PresignedPutSigner {
    /// Creates a new S3 signer
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - Bucket receiving profile photos
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait::async_trait]
impl PresignedPutSigner for S3PresignedPutSigner {
    /// Generates a presigned URL for PUT operations
    ///
    /// Signing happens locally from the client credentials, no request is sent to S3.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::ConfigError` if presigning config creation fails
    /// Returns `UploadError::SigningError` if presigned URL generation fails
    async fn presign_put(&self, request: PresignedPutRequest) -> UploadResult<PresignedUrl> {
        let presigned_config = PresigningConfig::expires_in(request.expires_in).map_err(|e| {
            UploadError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(request.key.as_str())
            .content_type(request.content_type)
            .content_length(request.content_length)
            .checksum_sha256(request.checksum_sha256)
            .checksum_algorithm(ChecksumAlgorithm::Sha256)
            .presigned(presigned_config)
            .await
            .map_err(|e| {
                UploadError::SigningError(format!("Failed to generate presigned URL: {e}"))
            })?;

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_at: Utc::now() + request.expires_in,
        })
    }
}

/// Test doubles for [`PresignedPutSigner`]
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::{PresignedPutRequest, PresignedPutSigner, PresignedUrl};
    use crate::upload::{UploadError, UploadResult};

    /// Signer double that records every request it receives
    pub struct MockPresignedPutSigner {
        fail_with: Option<String>,
        requests: Mutex<Vec<PresignedPutRequest>>,
    }

    impl MockPresignedPutSigner {
        /// Signer that always succeeds with a fake URL embedding the key
        #[must_use]
        pub const fn new() -> Self {
            Self {
                fail_with: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Signer that always fails with the given message
        #[must_use]
        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Requests received so far
        ///
        /// # Panics
        ///
        /// Panics if the request log mutex is poisoned
        #[must_use]
        pub fn requests(&self) -> Vec<PresignedPutRequest> {
            self.requests.lock().expect("request log poisoned").clone()
        }
    }

    impl Default for MockPresignedPutSigner {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait::async_trait]
    impl PresignedPutSigner for MockPresignedPutSigner {
        async fn presign_put(&self, request: PresignedPutRequest) -> UploadResult<PresignedUrl> {
            self.requests
                .lock()
                .expect("request log poisoned")
                .push(request.clone());

            if let Some(message) = &self.fail_with {
                return Err(UploadError::SigningError(message.clone()));
            }

            Ok(PresignedUrl {
                url: format!(
                    "https://mock-bucket.s3.amazonaws.com/{}?X-Amz-Expires={}",
                    request.key,
                    request.expires_in.as_secs()
                ),
                expires_at: Utc::now() + request.expires_in,
            })
        }
    }
}
