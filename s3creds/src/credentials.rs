use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Keys used to sign object-storage requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    /// Empty for long-lived keys.
    #[serde(default)]
    pub session_token: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            session_token: String::new(),
        }
    }

    pub fn with_session_token(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            session_token: session_token.into(),
        }
    }

    /// True when the keys came with a session token and will expire.
    pub fn is_temporary(&self) -> bool {
        !self.session_token.is_empty()
    }
}

/// Credential document served for an IAM role by the instance metadata service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "LastUpdated", default)]
    pub last_updated: String,
    #[serde(rename = "Type", default)]
    pub credential_type: String,
    #[serde(rename = "AccessKeyId", default)]
    pub access_key_id: String,
    #[serde(rename = "SecretAccessKey", default)]
    pub secret_access_key: String,
    #[serde(rename = "Token", default)]
    pub token: String,
    #[serde(rename = "Expiration", default)]
    pub expiration: String,
}

impl MetadataDocument {
    pub fn into_credentials(self) -> Result<Credentials> {
        if self.access_key_id.is_empty() {
            return Err(Error::MalformedMetadata("missing AccessKeyId".to_string()));
        }
        if self.secret_access_key.is_empty() {
            return Err(Error::MalformedMetadata(
                "missing SecretAccessKey".to_string(),
            ));
        }

        Ok(Credentials::with_session_token(
            self.access_key_id,
            self.secret_access_key,
            self.token,
        ))
    }
}
