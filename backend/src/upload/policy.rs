//! Fixed policy applied to every upload request

use std::time::Duration;

use strum::Display;

/// Image MIME types accepted for profile photos
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Largest accepted upload, inclusive (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1_048_576;

/// Validity window of an issued upload URL
pub const DEFAULT_PRESIGNED_URL_EXPIRY: Duration = Duration::from_secs(60);

/// Why an upload request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RejectionReason {
    /// Declared content type is not on the allow-list
    #[strum(to_string = "File type not allowed")]
    FileTypeNotAllowed,
    /// Declared size exceeds the maximum
    #[strum(to_string = "File size too large")]
    FileSizeTooLarge,
}

/// Upload constraints checked before any credential is issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Exact content type strings accepted
    pub allowed_content_types: &'static [&'static str],
    /// Largest accepted size in bytes
    pub max_file_size_bytes: u64,
    /// How long an issued URL stays valid
    pub presigned_url_expiry: Duration,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            presigned_url_expiry: DEFAULT_PRESIGNED_URL_EXPIRY,
        }
    }
}

impl UploadPolicy {
    /// Default policy with a different URL validity window
    #[must_use]
    pub fn with_expiry(presigned_url_expiry: Duration) -> Self {
        Self {
            presigned_url_expiry,
            ..Self::default()
        }
    }

    /// Checks the declared type, then the declared size
    ///
    /// # Errors
    ///
    /// Returns the first rule the request breaks
    pub fn check(&self, content_type: &str, size_bytes: u64) -> Result<(), RejectionReason> {
        if !self.allowed_content_types.contains(&content_type) {
            return Err(RejectionReason::FileTypeNotAllowed);
        }

        if size_bytes > self.max_file_size_bytes {
            return Err(RejectionReason::FileSizeTooLarge);
        }

        Ok(())
    }
}
