use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::credentials::Credentials;
use crate::error::{Error, Result};

/// Same variable names as the aws cli.
pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads long-lived keys from environment variables.
#[derive(Clone)]
pub struct EnvReader {
    lookup: Lookup,
}

impl EnvReader {
    /// Reader backed by the process environment.
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Reader backed by an arbitrary key-value lookup.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Reader backed by a fixed set of variables.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::with_lookup(move |name| vars.get(name).cloned())
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let access_key = self.non_empty(ACCESS_KEY_VAR);
        let secret_key = self.non_empty(SECRET_KEY_VAR);

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(Credentials::new(access_key, secret_key)),
            _ => Err(Error::MissingCredentials),
        }
    }

    fn non_empty(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.is_empty())
    }
}

impl Default for EnvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvReader").finish_non_exhaustive()
    }
}
