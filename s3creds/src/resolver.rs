use tracing::debug;

use crate::config::ResolverConfig;
use crate::credentials::Credentials;
use crate::env::EnvReader;
use crate::error::{Error, Result};
use crate::metadata::MetadataClient;

/// Resolves credentials from the environment, falling back to the
/// instance metadata service.
///
/// Nothing is cached: every call starts over with the environment.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    env: EnvReader,
    metadata: MetadataClient,
}

impl Resolver {
    /// Process environment plus the default metadata address.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_sources(EnvReader::new(), config.metadata.client())
    }

    pub fn with_sources(env: EnvReader, metadata: MetadataClient) -> Self {
        Self { env, metadata }
    }

    /// Environment first, then metadata.
    ///
    /// When both fail the returned `NoCredentialsFound` only says so; the two
    /// underlying errors are available through [`Error::causes`].
    pub async fn resolve(&self) -> Result<Credentials> {
        let env_err = match self.env.credentials() {
            Ok(creds) => {
                debug!("Using credentials from the environment");
                return Ok(creds);
            }
            Err(e) => e,
        };
        debug!("Environment credentials unavailable: {}", env_err);

        let metadata_err = match self.metadata.credentials().await {
            Ok(creds) => {
                debug!("Using credentials from the instance metadata service");
                return Ok(creds);
            }
            Err(e) => e,
        };
        debug!("Instance credentials unavailable: {}", metadata_err);

        Err(Error::NoCredentialsFound {
            env: Box::new(env_err),
            metadata: Box::new(metadata_err),
        })
    }

    pub fn env_credentials(&self) -> Result<Credentials> {
        self.env.credentials()
    }

    pub async fn instance_credentials(&self) -> Result<Credentials> {
        self.metadata.credentials().await
    }

    pub fn metadata_client(&self) -> &MetadataClient {
        &self.metadata
    }
}
