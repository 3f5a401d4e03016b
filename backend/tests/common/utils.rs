use axum::response::Response;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Upload request body as the profile form sends it
pub fn create_upload_request(file_type: &str, file_size: u64, checksum: &str) -> serde_json::Value {
    json!({
        "fileType": file_type,
        "fileSize": file_size,
        "checksum": checksum
    })
}

/// Profile body that passes validation
pub fn create_profile_request(profile_photo_url: &str) -> serde_json::Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "address": "12 St James's Square, London",
        "profilePhotoUrl": profile_photo_url
    })
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Random bytes standing in for an image, with their SHA-256 as lowercase hex
pub fn generate_test_image(size: usize) -> (Vec<u8>, String) {
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        data.extend_from_slice(Uuid::new_v4().as_bytes());
    }
    data.truncate(size);

    let sha256 = calculate_sha256(&data);
    (data, sha256)
}

/// Calculate SHA-256 checksum of data and return as lowercase hex string
pub fn calculate_sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Convert a hex SHA-256 digest to the base64 form S3 checksum headers use
pub fn hex_sha256_to_base64(sha256: &str) -> String {
    STANDARD.encode(hex::decode(sha256).unwrap())
}

/// Object key embedded in a path-style presigned URL (`/{bucket}/{key}`)
pub fn object_key_from_url(url: &str) -> String {
    let parsed = url::Url::parse(url).unwrap();
    parsed
        .path_segments()
        .and_then(|mut segments| segments.nth(1))
        .unwrap()
        .to_string()
}

/// Value of a query parameter in a URL
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = url::Url::parse(url).unwrap();
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
