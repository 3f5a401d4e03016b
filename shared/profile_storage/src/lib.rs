//! Storage for the single user profile
//!
//! The profile lives in one `DynamoDB` item under a fixed key. Writes are
//! whole-item replacements, so an upsert is a single `PutItem`.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

pub mod profile;

pub use profile::{
    Profile, ProfileAttribute, ProfileStorage, ProfileStorageError, ProfileStorageResult,
    ProfileUpsertRequest, SINGLETON_PROFILE_ID,
};
