use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hex::FromHex;
use rand::{rngs::OsRng, RngCore};

/// Number of random bytes in an object key
pub const OBJECT_KEY_BYTES: usize = 32;

/// Server-generated name of an uploaded object
///
/// Always `OBJECT_KEY_BYTES` bytes from the OS RNG, lowercase hex encoded.
/// Never derived from anything the client sends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Generates a fresh random key
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; OBJECT_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// The key as stored in the bucket
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a client checksum to the form S3 expects for `x-amz-checksum-sha256`
///
/// A 64-char hex SHA-256 digest is re-encoded as base64. Anything else is
/// passed through untouched; S3 rejects the PUT if it does not match the body.
#[must_use]
pub fn normalize_checksum(checksum: &str) -> String {
    <[u8; 32]>::from_hex(checksum)
        .map_or_else(|_| checksum.to_string(), |digest| STANDARD.encode(digest))
}
