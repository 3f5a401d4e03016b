use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    types::{AppError, ValidatedJson},
    upload::{Authorization, UploadAuthorizer, UploadRequest},
};

/// Request for a profile photo upload URL
///
/// Unknown fields are ignored. The object key is always generated server-side.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlRequest {
    /// MIME type of the photo, e.g. `image/png`
    pub file_type: String,
    /// Size of the photo in bytes, any JSON number
    pub file_size: serde_json::Number,
    /// SHA-256 of the photo, 64-char hex or base64
    pub checksum: String,
}

/// Declared size in whole bytes
///
/// Fractions round up and values beyond `u64` saturate, so anything too large
/// still reaches the size check. Negative sizes are malformed.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn declared_size(file_size: &serde_json::Number) -> Result<u64, AppError> {
    if let Some(size) = file_size.as_u64() {
        return Ok(size);
    }

    match file_size.as_f64() {
        Some(size) if size >= 0.0 => Ok(size.ceil() as u64),
        _ => Err(AppError::validation(
            "invalid_file_size",
            "File size must be a non-negative number",
        )),
    }
}

/// Presigned URL the photo can be PUT to
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadUrl {
    /// Single-object PUT URL, valid for a short window
    pub url: String,
}

/// Either an upload URL or the policy rule the request broke
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PresignedUrlResponse {
    /// Upload may proceed
    Success(UploadUrl),
    /// Upload was refused, e.g. "File type not allowed"
    Failure(String),
}

impl IntoResponse for PresignedUrlResponse {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Success(_) => StatusCode::OK,
            Self::Failure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (status, Json(self)).into_response()
    }
}

impl OperationOutput for PresignedUrlResponse {
    type Inner = Self;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<Self>::operation_response(ctx, operation)
    }
}

/// Upload policy the client can mirror before asking for a URL
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfigResponse {
    /// Accepted MIME types
    pub allowed_file_types: Vec<String>,
    /// Largest accepted size in bytes
    pub max_file_size: u64,
    /// Validity window of issued URLs in seconds
    pub url_expiry_secs: u64,
}

/// Creates a presigned URL for uploading a profile photo
///
/// The photo is checked against the upload policy (allowed image type,
/// maximum size). If it passes, a random object key is generated and a PUT
/// URL bound to that key, the declared type, size and checksum is returned.
///
/// # Errors
///
/// - 400 if the body is malformed or the size is negative
/// - 400 `invalid_checksum` if an otherwise acceptable upload has no checksum
/// - 500 `upload_failed` if the URL could not be signed
#[instrument(skip(upload_authorizer, payload))]
pub async fn create_presigned_url(
    Extension(upload_authorizer): Extension<Arc<UploadAuthorizer>>,
    ValidatedJson(payload): ValidatedJson<PresignedUrlRequest>,
) -> Result<PresignedUrlResponse, AppError> {
    let authorization = upload_authorizer
        .authorize(UploadRequest {
            size_bytes: declared_size(&payload.file_size)?,
            content_type: payload.file_type,
            checksum: payload.checksum,
        })
        .await?;

    Ok(match authorization {
        Authorization::Granted(credential) => {
            PresignedUrlResponse::Success(UploadUrl { url: credential.url })
        }
        Authorization::Rejected(reason) => PresignedUrlResponse::Failure(reason.to_string()),
    })
}

/// Returns the upload policy
#[allow(clippy::unused_async)]
pub async fn get_upload_config(
    Extension(upload_authorizer): Extension<Arc<UploadAuthorizer>>,
) -> Json<UploadConfigResponse> {
    let policy = upload_authorizer.policy();

    Json(UploadConfigResponse {
        allowed_file_types: policy
            .allowed_content_types
            .iter()
            .map(ToString::to_string)
            .collect(),
        max_file_size: policy.max_file_size_bytes,
        url_expiry_secs: policy.presigned_url_expiry.as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(raw: &str) -> Result<u64, AppError> {
        declared_size(&serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn test_integer_sizes_are_exact() {
        assert_eq!(size("0").unwrap(), 0);
        assert_eq!(size("10485760").unwrap(), 10_485_760);
        assert_eq!(size("18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn test_float_sizes_round_up_or_saturate() {
        assert_eq!(size("20000000.0").unwrap(), 20_000_000);
        assert_eq!(size("10485760.5").unwrap(), 10_485_761);
        assert_eq!(size("1e21").unwrap(), u64::MAX);
    }

    #[test]
    fn test_negative_sizes_are_rejected() {
        assert_eq!(size("-1").unwrap_err().code(), "invalid_file_size");
        assert_eq!(size("-0.5").unwrap_err().code(), "invalid_file_size");
    }
}
