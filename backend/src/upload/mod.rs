//! Authorization of direct-to-bucket profile photo uploads
//!
//! The backend never sees the photo bytes. It checks the declared type and
//! size, picks a random object key and hands back a short-lived presigned
//! PUT URL bound to that key, the declared type, size and checksum.

mod error;
mod key;
mod policy;
pub mod signer;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use url::Url;

pub use error::{UploadError, UploadResult};
pub use key::{normalize_checksum, ObjectKey, OBJECT_KEY_BYTES};
pub use policy::{
    RejectionReason, UploadPolicy, DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_MAX_FILE_SIZE_BYTES,
    DEFAULT_PRESIGNED_URL_EXPIRY,
};
pub use signer::{PresignedPutRequest, PresignedPutSigner, PresignedUrl, S3PresignedPutSigner};

/// Upload the client intends to perform
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Declared MIME type of the file
    pub content_type: String,
    /// Declared size of the file in bytes
    pub size_bytes: u64,
    /// SHA-256 of the file, hex or base64
    pub checksum: String,
}

/// Write capability for exactly one object
///
/// Anyone holding `url` can perform the upload until `expires_at`, so the
/// `Debug` output leaves it out.
#[derive(Clone)]
pub struct UploadCredential {
    /// Presigned PUT URL
    pub url: String,
    /// Key the URL writes to
    pub key: ObjectKey,
    /// When the URL stops working
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for UploadCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCredential")
            .field("url", &"<redacted>")
            .field("key", &self.key)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Outcome of a well-formed upload request
#[derive(Debug, Clone)]
pub enum Authorization {
    /// Request passed the policy and a URL was issued
    Granted(UploadCredential),
    /// Request broke the policy, nothing was issued
    Rejected(RejectionReason),
}

/// Validates upload requests and issues presigned PUT URLs
pub struct UploadAuthorizer {
    signer: Arc<dyn PresignedPutSigner>,
    policy: UploadPolicy,
}

impl UploadAuthorizer {
    /// Creates a new authorizer
    ///
    /// # Arguments
    ///
    /// * `signer` - Storage backend signer, shared for the process lifetime
    /// * `policy` - Allowed types, size limit and URL validity window
    #[must_use]
    pub fn new(signer: Arc<dyn PresignedPutSigner>, policy: UploadPolicy) -> Self {
        Self { signer, policy }
    }

    /// The policy requests are checked against
    #[must_use]
    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Authorizes a single upload
    ///
    /// The object key is generated only after the request passes the policy,
    /// so a rejected request consumes nothing.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::MissingChecksum` if a request that passes the
    /// policy has an empty checksum, or the signer's error if signing fails.
    /// Policy violations are reported as `Ok(Authorization::Rejected(_))`
    /// and take precedence over a missing checksum.
    #[instrument(skip(self, request), fields(content_type = %request.content_type, size_bytes = request.size_bytes))]
    pub async fn authorize(&self, request: UploadRequest) -> UploadResult<Authorization> {
        if let Err(reason) = self
            .policy
            .check(&request.content_type, request.size_bytes)
        {
            debug!(%reason, "Upload request rejected");
            return Ok(Authorization::Rejected(reason));
        }

        let Ok(content_length) = i64::try_from(request.size_bytes) else {
            return Ok(Authorization::Rejected(RejectionReason::FileSizeTooLarge));
        };

        if request.checksum.trim().is_empty() {
            return Err(UploadError::MissingChecksum);
        }

        let key = ObjectKey::generate();

        let presigned_url = self
            .signer
            .presign_put(PresignedPutRequest {
                key: key.clone(),
                content_type: request.content_type,
                content_length,
                checksum_sha256: normalize_checksum(&request.checksum),
                expires_in: self.policy.presigned_url_expiry,
            })
            .await?;

        info!(object_key = %key, expires_at = %presigned_url.expires_at, "Issued upload URL");

        Ok(Authorization::Granted(UploadCredential {
            url: presigned_url.url,
            key,
            expires_at: presigned_url.expires_at,
        }))
    }
}

/// Strips the query string and fragment from an upload URL
///
/// What remains is the plain object URL, which carries no signature and is
/// safe to store.
///
/// # Errors
///
/// Returns `url::ParseError` if `upload_url` is not an absolute URL
pub fn canonical_object_url(upload_url: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(upload_url)?;
    url.set_query(None);
    url.set_fragment(None);
    Ok(url.into())
}
