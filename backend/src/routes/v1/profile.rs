use std::sync::Arc;

use axum::{Extension, Json};
use profile_storage::{Profile, ProfileStorage, ProfileUpsertRequest};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    types::{AppError, ValidatedJson},
    upload::canonical_object_url,
};

/// Profile fields submitted by the form
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SaveProfileRequest {
    /// Given name
    #[validate(length(min = 1, code = "invalid_first_name", message = "First name is required"))]
    pub first_name: String,
    /// Family name
    #[validate(length(min = 1, code = "invalid_last_name", message = "Last name is required"))]
    pub last_name: String,
    /// Contact email
    #[validate(email(code = "invalid_email", message = "Invalid email address"))]
    pub email: String,
    /// Postal address
    #[validate(length(min = 1, code = "invalid_address", message = "Address is required"))]
    pub address: String,
    /// URL of the uploaded photo; any query string is dropped before saving
    #[serde(alias = "profilePhoto")]
    #[validate(url(code = "invalid_profile_photo_url", message = "Invalid photo URL"))]
    pub profile_photo_url: String,
}

/// Stored profile
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Fixed profile id
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Postal address
    pub address: String,
    /// Object URL of the profile photo
    pub profile_photo_url: String,
    /// Unix timestamp of the last save
    pub updated_at: i64,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            address: profile.address,
            profile_photo_url: profile.profile_photo_url,
            updated_at: profile.updated_at,
        }
    }
}

/// Get the profile
///
/// # Errors
///
/// - 404 `profile_not_found` if no profile has been saved yet
/// - 500 if the profile could not be read
#[instrument(skip(profile_storage))]
pub async fn get_profile(
    Extension(profile_storage): Extension<Arc<ProfileStorage>>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = profile_storage
        .get()
        .await?
        .ok_or_else(|| AppError::not_found("profile_not_found", "Profile not found"))?;

    Ok(Json(profile.into()))
}

/// Create or replace the profile
///
/// The photo URL is stored without its query string, so a presigned upload
/// URL submitted by mistake never ends up in the database with its signature.
///
/// # Errors
///
/// - 400 with a field-specific code if validation fails
/// - 500 if the profile could not be written
#[instrument(skip(profile_storage, payload))]
pub async fn save_profile(
    Extension(profile_storage): Extension<Arc<ProfileStorage>>,
    ValidatedJson(payload): ValidatedJson<SaveProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile_photo_url = canonical_object_url(&payload.profile_photo_url)
        .map_err(|_| AppError::validation("invalid_profile_photo_url", "Invalid photo URL"))?;

    let profile = profile_storage
        .upsert(ProfileUpsertRequest {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            address: payload.address,
            profile_photo_url,
        })
        .await?;

    tracing::info!("Profile saved");

    Ok(Json(profile.into()))
}
