//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use tracing::Level;

use super::StorageConfig;
use crate::upload::DEFAULT_PRESIGNED_URL_EXPIRY;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Optional override for presigned URL expiry in seconds
        presign_expiry_override: Option<u64>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => {
                let presign_expiry_override = env::var("PRESIGNED_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|val| val.parse::<u64>().ok());

                Self::Development {
                    presign_expiry_override,
                }
            }
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development { .. } => Some("http://localhost:4566"),
        }
    }

    /// Loads the object storage settings for this environment
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing outside development
    pub fn storage_config(&self) -> anyhow::Result<StorageConfig> {
        match self {
            Self::Production | Self::Staging => StorageConfig::from_env(),
            Self::Development { .. } => Ok(StorageConfig::from_env_or_localstack()),
        }
    }

    /// `DynamoDB` table holding the profile record
    ///
    /// # Errors
    ///
    /// Returns an error if `PROFILE_TABLE_NAME` is missing outside development
    pub fn profile_table_name(&self) -> anyhow::Result<String> {
        match self {
            Self::Production | Self::Staging => env::var("PROFILE_TABLE_NAME").map_err(|_| {
                anyhow::anyhow!("PROFILE_TABLE_NAME environment variable is not set")
            }),
            Self::Development { .. } => {
                Ok(env::var("PROFILE_TABLE_NAME").unwrap_or_else(|_| "profiles".to_string()))
            }
        }
    }

    /// AWS configuration with retry and timeout settings
    ///
    /// Region and credentials come from `storage` rather than the default
    /// provider chain, so the service runs with exactly the keys it was given.
    pub async fn aws_config(&self, storage: &StorageConfig) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let credentials = Credentials::new(
            storage.access_key_id.clone(),
            storage.secret_access_key.clone(),
            None,
            None,
            "profile-backend",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(storage.region.clone()))
            .credentials_provider(credentials)
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self, storage: &StorageConfig) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config(storage).await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development { .. }) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Presigned URL validity window
    #[must_use]
    pub fn presigned_url_expiry(&self) -> Duration {
        match self {
            Self::Production | Self::Staging => DEFAULT_PRESIGNED_URL_EXPIRY,
            Self::Development {
                presign_expiry_override,
            } => presign_expiry_override.map_or(DEFAULT_PRESIGNED_URL_EXPIRY, Duration::from_secs),
        }
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development { .. } => Level::DEBUG,
            })
    }
}
