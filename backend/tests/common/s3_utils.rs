use aws_sdk_s3::Client as S3Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};

/// Upload data to S3 using presigned URL
pub async fn upload_to_s3(
    presigned_url: &str,
    data: &[u8],
    content_type: &str,
    checksum_sha256: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    let headers = create_upload_headers(data.len(), content_type, checksum_sha256);

    let client = reqwest::Client::new();
    client
        .put(presigned_url)
        .headers(headers)
        .body(data.to_vec())
        .send()
        .await
}

/// Create headers for S3 upload with specific content type and checksum
pub fn create_upload_headers(
    content_length: usize,
    content_type: &str,
    checksum_sha256: &str,
) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
    headers.insert(
        "x-amz-checksum-sha256",
        HeaderValue::from_str(checksum_sha256).unwrap(),
    );
    headers.insert(
        "x-amz-sdk-checksum-algorithm",
        HeaderValue::from_str("SHA256").unwrap(),
    );

    headers
}

/// Create the bucket in LocalStack if it does not exist yet
pub async fn ensure_bucket(s3_client: &S3Client, bucket_name: &str) {
    if s3_client
        .head_bucket()
        .bucket(bucket_name)
        .send()
        .await
        .is_err()
    {
        s3_client
            .create_bucket()
            .bucket(bucket_name)
            .send()
            .await
            .expect("Failed to create test bucket");
    }
}

/// Download an object straight from S3
pub async fn download_from_s3(
    s3_client: &S3Client,
    bucket_name: &str,
    key: &str,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let object = s3_client
        .get_object()
        .bucket(bucket_name)
        .key(key)
        .send()
        .await?;

    let bytes = object.body.collect().await?.into_bytes();
    Ok(bytes.to_vec())
}
