use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use profile_backend::{
    server,
    types::Environment,
    upload::{S3PresignedPutSigner, UploadAuthorizer, UploadPolicy},
};
use profile_storage::ProfileStorage;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, plain text for development
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();
    if environment.json_logs() {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let storage_config = environment.storage_config()?;
    info!(
        region = %storage_config.region,
        bucket = %storage_config.bucket_name,
        "Starting Profile Backend in {:?} environment",
        environment
    );

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(&storage_config).await,
    ));
    let signer = Arc::new(S3PresignedPutSigner::new(
        s3_client,
        storage_config.bucket_name.clone(),
    ));
    let upload_authorizer = Arc::new(UploadAuthorizer::new(
        signer,
        UploadPolicy::with_expiry(environment.presigned_url_expiry()),
    ));

    let dynamodb_client = Arc::new(DynamoDbClient::new(
        &environment.aws_config(&storage_config).await,
    ));
    let profile_storage = Arc::new(ProfileStorage::new(
        dynamodb_client,
        environment.profile_table_name()?,
    ));

    server::start(environment, upload_authorizer, profile_storage).await
}
