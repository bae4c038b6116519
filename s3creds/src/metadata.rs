//! Client for the instance metadata service
//!
//! Temporary credentials are discovered in two requests against the
//! link-local metadata address:
//! - `GET /latest/meta-data/iam/security-credentials/` returns the role name
//! - `GET /latest/meta-data/iam/security-credentials/{role}` returns a JSON
//!   [`MetadataDocument`] for that role
//!
//! Neither request carries authentication headers.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::credentials::{Credentials, MetadataDocument};
use crate::error::{Error, MetadataStep, Result};

pub const DEFAULT_ENDPOINT: &str = "http://169.254.169.254";
pub const CREDENTIALS_PATH: &str = "/latest/meta-data/iam/security-credentials/";

/// Fetches role credentials from the metadata service.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

/// Creates [MetadataClient] instances.
#[derive(Debug, Default)]
pub struct Builder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl Builder {
    /// Sets the metadata service address.
    ///
    /// If not set, the client uses `http://169.254.169.254`.
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets a deadline for each of the two requests.
    ///
    /// By default no deadline is applied and a request waits as long as the
    /// HTTP client does.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> MetadataClient {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        MetadataClient {
            client: Client::new(),
            base_url: format!("{}{}", endpoint.trim_end_matches('/'), CREDENTIALS_PATH),
            timeout: self.timeout,
        }
    }
}

impl MetadataClient {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Full URL of the role listing.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the role attached to the instance.
    ///
    /// The instance is expected to carry exactly one role; the body is
    /// returned as-is.
    pub async fn role_name(&self) -> Result<String> {
        let role = self.get(&self.base_url, MetadataStep::RoleDiscovery).await?;
        if role.contains('\n') {
            warn!("Metadata service listed more than one role: {:?}", role);
        }
        Ok(role)
    }

    /// Credential document for `role`.
    pub async fn document(&self, role: &str) -> Result<MetadataDocument> {
        let url = format!("{}{}", self.base_url, role);
        let body = self.get(&url, MetadataStep::CredentialFetch).await?;

        serde_json::from_str(&body).map_err(|e| Error::MalformedMetadata(e.to_string()))
    }

    pub async fn credentials(&self) -> Result<Credentials> {
        let role = self.role_name().await?;
        debug!("Fetching instance credentials for role: {}", role);

        self.document(&role).await?.into_credentials()
    }

    async fn get(&self, url: &str, step: MetadataStep) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|source| Error::Transport { step, source })?;

        let status = response.status();
        if status != StatusCode::OK {
            let headers = response.headers().clone();
            // The status is the error; a body that fails to arrive stays empty.
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                step,
                status,
                headers,
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|source| Error::Transport { step, source })
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}
