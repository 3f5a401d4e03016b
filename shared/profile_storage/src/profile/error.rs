//! Error types for profile storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{get_item::GetItemError, put_item::PutItemError};
use thiserror::Error;

/// Result type alias for storage operations
pub type ProfileStorageResult<T> = Result<T, ProfileStorageError>;

/// Storage error types for profile operations
#[derive(Debug, Error)]
pub enum ProfileStorageError {
    /// Failed to write the profile to `DynamoDB`
    #[error("Failed to write profile to DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to read the profile from `DynamoDB`
    #[error("Failed to get profile from DynamoDB: {0:?}")]
    DynamoDbGetError(#[from] SdkError<GetItemError>),

    /// Failed to convert between `Profile` and a `DynamoDB` item
    #[error("Failed to parse profile: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for ProfileStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
