//! Profile editor backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// HTTP routes
pub mod routes;

/// Server startup
pub mod server;

/// Configuration, error envelope and extractors
pub mod types;

/// Profile photo upload authorization
pub mod upload;
