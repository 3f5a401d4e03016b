//! Object storage settings

use std::env;
use std::fmt;

use anyhow::Context;

/// Region, bucket and write credentials for the photo bucket
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// AWS region of the bucket
    pub region: String,
    /// Bucket receiving profile photos
    pub bucket_name: String,
    /// Access key id used to sign upload URLs
    pub access_key_id: String,
    /// Secret access key used to sign upload URLs
    pub secret_access_key: String,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("region", &self.region)
            .field("bucket_name", &self.bucket_name)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl StorageConfig {
    /// Reads `AWS_BUCKET_REGION`, `AWS_BUCKET_NAME`, `AWS_ACCESS_KEY` and
    /// `AWS_SECRET_ACCESS_KEY`
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable that is not set
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            region: required_var("AWS_BUCKET_REGION")?,
            bucket_name: required_var("AWS_BUCKET_NAME")?,
            access_key_id: required_var("AWS_ACCESS_KEY")?,
            secret_access_key: required_var("AWS_SECRET_ACCESS_KEY")?,
        })
    }

    /// Same variables as [`Self::from_env`], defaulting to `LocalStack` values
    #[must_use]
    pub fn from_env_or_localstack() -> Self {
        Self {
            region: env::var("AWS_BUCKET_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            bucket_name: env::var("AWS_BUCKET_NAME")
                .unwrap_or_else(|_| "profile-photos".to_string()),
            access_key_id: env::var("AWS_ACCESS_KEY").unwrap_or_else(|_| "test".to_string()),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .unwrap_or_else(|_| "test".to_string()),
        }
    }
}

fn required_var(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{name} environment variable is not set"))
}
