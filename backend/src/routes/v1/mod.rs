/// Singleton profile endpoints
pub mod profile;
/// Profile photo upload authorization
pub mod uploads;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/uploads/presigned-url",
            post(uploads::create_presigned_url),
        )
        .api_route("/uploads/config", get(uploads::get_upload_config))
        .api_route(
            "/profile",
            get(profile::get_profile).post(profile::save_profile),
        )
}
