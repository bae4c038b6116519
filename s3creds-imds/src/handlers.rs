use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use s3creds::MetadataDocument;
use serde_json::json;
use tracing::{info, warn};

use crate::config::ImdsConfig;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Clone)]
pub struct AppState {
    pub config: ImdsConfig,
}

// Name of the attached role
pub async fn list_roles(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [("Content-Type", "text/plain")],
        state.config.role.name.clone(),
    )
        .into_response()
}

// Credential document for a role
pub async fn get_role_credentials(
    Path(role_name): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let role = &state.config.role;
    if role_name != role.name {
        warn!("Credentials requested for unknown role: {}", role_name);
        return (StatusCode::NOT_FOUND, "Role not found").into_response();
    }

    info!("Serving credentials for role: {}", role_name);

    let document = MetadataDocument {
        code: "Success".to_string(),
        last_updated: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        credential_type: "AWS-HMAC".to_string(),
        access_key_id: role.access_key_id.clone(),
        secret_access_key: role.secret_access_key.clone(),
        token: role.token.clone(),
        expiration: role.expiration.format(TIMESTAMP_FORMAT).to_string(),
    };

    (StatusCode::OK, Json(document)).into_response()
}

pub async fn health_check() -> Response {
    (StatusCode::OK, Json(json!({"status": "healthy"}))).into_response()
}
