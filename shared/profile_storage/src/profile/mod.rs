//! Profile storage module for `DynamoDB` operations

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
pub use error::{ProfileStorageError, ProfileStorageResult};
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_item, to_item};
use strum::Display;
use tracing::debug;

/// Primary key of the one and only profile
pub const SINGLETON_PROFILE_ID: i64 = 1;

/// `DynamoDB` item for the user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Primary key - always `SINGLETON_PROFILE_ID`
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Postal address
    pub address: String,
    /// Object URL of the profile photo, without any signature
    pub profile_photo_url: String,
    /// Timestamp of the last write
    pub updated_at: i64,
}

/// Fields a client may set on the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpsertRequest {
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
}

/// `DynamoDB` attribute names for the profile table
#[derive(Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProfileAttribute {
    /// Primary key
    Id,
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Contact email
    Email,
    /// Postal address
    Address,
    /// Profile photo URL
    ProfilePhotoUrl,
    /// Last write timestamp
    UpdatedAt,
}

/// Storage client for the singleton profile
pub struct ProfileStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl ProfileStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for the profile
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    fn key() -> AttributeValue {
        AttributeValue::N(SINGLETON_PROFILE_ID.to_string())
    }

    /// Get the profile, if one has been saved
    ///
    /// # Errors
    ///
    /// Returns `ProfileStorageError` if the `DynamoDB` get operation fails
    pub async fn get(&self) -> ProfileStorageResult<Option<Profile>> {
        let response = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(ProfileAttribute::Id.to_string(), Self::key())
            .consistent_read(true)
            .send()
            .await?;

        response
            .item
            .map(|item| from_item(item).map_err(ProfileStorageError::from))
            .transpose()
    }

    /// Create the profile or replace every field of the existing one
    ///
    /// # Errors
    ///
    /// Returns `ProfileStorageError` if the `DynamoDB` put operation fails
    pub async fn upsert(&self, request: ProfileUpsertRequest) -> ProfileStorageResult<Profile> {
        let profile = Profile {
            id: SINGLETON_PROFILE_ID,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            address: request.address,
            profile_photo_url: request.profile_photo_url,
            updated_at: chrono::Utc::now().timestamp(),
        };

        let item = to_item(&profile)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        debug!("Saved profile {}", profile.id);

        Ok(profile)
    }
}
