//! Error types for upload authorization

use thiserror::Error;

/// Result type for upload authorization
pub type UploadResult<T> = Result<T, UploadError>;

/// Failures while issuing an upload credential
///
/// Policy rejections are not errors, see [`super::Authorization`].
#[derive(Error, Debug)]
pub enum UploadError {
    /// Presigning configuration could not be built
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The storage backend failed to sign the request
    #[error("Signing error: {0}")]
    SigningError(String),

    /// Request passed the policy but carried no checksum to bind the URL to
    #[error("Checksum is required")]
    MissingChecksum,
}
