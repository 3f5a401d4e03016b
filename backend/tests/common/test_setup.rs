use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use axum::{body::Body, http::Request, response::Response, Extension, Router};
use profile_backend::{
    routes,
    types::{Environment, StorageConfig},
    upload::{PresignedPutSigner, S3PresignedPutSigner, UploadAuthorizer, UploadPolicy},
};
use profile_storage::ProfileStorage;
use std::sync::Arc;
use tower::ServiceExt;

use super::dynamodb_setup::DynamoDbTestSetup;

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// LocalStack credentials; presigning with them needs no running LocalStack
pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        region: "us-east-1".to_string(),
        bucket_name: "profile-photos".to_string(),
        access_key_id: "test".to_string(),
        secret_access_key: "test".to_string(),
    }
}

/// Router wired with real S3 signing and a DynamoDB client pointed at LocalStack
pub struct TestContext {
    pub router: Router,
    pub environment: Environment,
    pub storage_config: StorageConfig,
    pub s3_client: Arc<S3Client>,
    pub dynamodb_client: Arc<DynamoDbClient>,
    // Keep the profile table alive for the duration of the test
    _dynamodb_setup: Option<DynamoDbTestSetup>,
}

impl TestContext {
    /// Context whose upload URLs expire after the given override (or the default)
    pub async fn new(presign_expiry_override: Option<u64>) -> Self {
        Self::build(presign_expiry_override, None, false).await
    }

    /// Context whose authorizer signs with the given signer
    pub async fn with_signer(signer: Arc<dyn PresignedPutSigner>) -> Self {
        Self::build(None, Some(signer), false).await
    }

    /// Context backed by a fresh profile table (requires LocalStack)
    pub async fn with_profile_table() -> Self {
        Self::build(None, None, true).await
    }

    async fn build(
        presign_expiry_override: Option<u64>,
        signer: Option<Arc<dyn PresignedPutSigner>>,
        create_profile_table: bool,
    ) -> Self {
        setup_test_env();

        let environment = Environment::Development {
            presign_expiry_override,
        };
        let storage_config = test_storage_config();

        let s3_client = Arc::new(S3Client::from_conf(
            environment.s3_client_config(&storage_config).await,
        ));
        let signer: Arc<dyn PresignedPutSigner> = match signer {
            Some(signer) => signer,
            None => Arc::new(S3PresignedPutSigner::new(
                s3_client.clone(),
                storage_config.bucket_name.clone(),
            )),
        };
        let upload_authorizer = Arc::new(UploadAuthorizer::new(
            signer,
            UploadPolicy::with_expiry(environment.presigned_url_expiry()),
        ));

        let dynamodb_client = Arc::new(DynamoDbClient::new(
            &environment.aws_config(&storage_config).await,
        ));
        let dynamodb_setup = if create_profile_table {
            Some(DynamoDbTestSetup::new(dynamodb_client.clone()).await)
        } else {
            None
        };
        let profile_table_name = dynamodb_setup.as_ref().map_or_else(
            || "profiles".to_string(),
            |setup| setup.profile_table_name.clone(),
        );
        let profile_storage = Arc::new(ProfileStorage::new(
            dynamodb_client.clone(),
            profile_table_name,
        ));

        let router = routes::handler()
            .layer(Extension(environment.clone()))
            .layer(Extension(upload_authorizer))
            .layer(Extension(profile_storage))
            .into();

        Self {
            router,
            environment,
            storage_config,
            s3_client,
            dynamodb_client,
            _dynamodb_setup: dynamodb_setup,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_raw_post_request(
        &self,
        route: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder().uri(route).method("POST");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(Body::from(body.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
