//! Access keys for object-storage requests.
//!
//! Credentials are taken from `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`
//! when both are set, otherwise from the IAM role attached to the instance
//! via the metadata service at `169.254.169.254`.

pub mod config;
pub mod credentials;
pub mod env;
pub mod error;
pub mod metadata;
pub mod resolver;

#[cfg(test)]
mod test_helpers;

pub use config::{MetadataConfig, ResolverConfig};
pub use credentials::{Credentials, MetadataDocument};
pub use env::EnvReader;
pub use error::{Error, MetadataStep, Result};
pub use metadata::MetadataClient;
pub use resolver::Resolver;

/// Keys from the process environment.
pub fn env_credentials() -> Result<Credentials> {
    EnvReader::new().credentials()
}

/// Temporary keys for the instance's IAM role.
pub async fn instance_credentials() -> Result<Credentials> {
    MetadataClient::new().credentials().await
}

/// Keys from the environment, or from the instance's IAM role.
pub async fn resolve_credentials() -> Result<Credentials> {
    Resolver::new().resolve().await
}
