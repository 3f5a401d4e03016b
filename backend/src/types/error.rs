//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use profile_storage::ProfileStorageError;
use schemars::JsonSchema;
use serde::Serialize;

use crate::upload::UploadError;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(
        status: StatusCode,
        code: impl Into<String>,
        msg: impl Into<String>,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody {
                    code: code.into(),
                    message: msg.into(),
                },
            },
        }
    }

    /// 400 for a request body that failed validation
    #[must_use]
    pub fn validation(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, msg, false)
    }

    /// 404 for a missing resource
    #[must_use]
    pub fn not_found(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, msg, false)
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.inner.error.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Signing failures are deployment problems, the client only sees a generic message
impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match &err {
            UploadError::MissingChecksum => {
                return Self::validation("invalid_checksum", "Checksum is required");
            }
            UploadError::ConfigError(msg) => {
                tracing::error!("Presigning configuration error: {msg}");
            }
            UploadError::SigningError(msg) => {
                tracing::error!("Presigning error: {msg}");
            }
        }

        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upload_failed",
            "Upload failed",
            false,
        )
    }
}

impl From<ProfileStorageError> for AppError {
    fn from(err: ProfileStorageError) -> Self {
        tracing::error!("Profile storage error: {err}");

        let retry = !matches!(err, ProfileStorageError::SerializationError(_));
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
            retry,
        )
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
