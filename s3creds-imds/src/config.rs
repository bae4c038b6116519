use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImdsConfig {
    pub server: ServerConfig,
    pub role: RoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// The single role attached to the emulated instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub token: String,
    pub expiration: DateTime<Utc>,
}

impl ImdsConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: ImdsConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
