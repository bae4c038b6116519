//! Local stand-in for the instance metadata service.
//!
//! Serves one configured role over the same two-step protocol a cloud
//! instance sees, so credential resolution can be exercised off-cloud.

pub mod config;
pub mod handlers;

use axum::{routing::get, Router};
use s3creds::metadata::CREDENTIALS_PATH;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use config::ImdsConfig;
use handlers::{get_role_credentials, health_check, list_roles, AppState};

pub fn router(config: ImdsConfig) -> Router {
    let state = AppState { config };

    Router::new()
        .route(CREDENTIALS_PATH, get(list_roles))
        .route(
            &format!("{}:role", CREDENTIALS_PATH),
            get(get_role_credentials),
        )
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
