//! Error types for credential resolution

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Which of the two metadata requests failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataStep {
    /// Listing the role attached to the instance
    RoleDiscovery,
    /// Fetching the credential document for that role
    CredentialFetch,
}

impl fmt::Display for MetadataStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataStep::RoleDiscovery => write!(f, "role discovery"),
            MetadataStep::CredentialFetch => write!(f, "credential fetch"),
        }
    }
}

/// Error type for credential resolution
#[derive(Debug, Error)]
pub enum Error {
    /// One or both environment variables are unset or empty
    #[error("AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY are not both set in the environment")]
    MissingCredentials,

    /// The metadata service could not be reached
    #[error("metadata {step} request failed: {source}")]
    Transport {
        step: MetadataStep,
        #[source]
        source: reqwest::Error,
    },

    /// The metadata service answered with a non-200 status
    #[error("metadata {step} request returned {status}: {}", excerpt(.body))]
    HttpStatus {
        step: MetadataStep,
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },

    /// The credential document could not be parsed or lacks keys
    #[error("malformed role metadata document: {0}")]
    MalformedMetadata(String),

    /// Neither the environment nor the metadata service produced credentials
    #[error("no credentials found")]
    NoCredentialsFound {
        env: Box<Error>,
        metadata: Box<Error>,
    },
}

impl Error {
    /// Causes behind a `NoCredentialsFound`, environment first.
    pub fn causes(&self) -> Option<(&Error, &Error)> {
        match self {
            Error::NoCredentialsFound { env, metadata } => Some((env, metadata)),
            _ => None,
        }
    }
}

const BODY_EXCERPT_CHARS: usize = 200;

// Error pages can be large; only the start of the body goes into messages.
fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Result type for credential resolution
pub type Result<T> = std::result::Result<T, Error>;
