//! Connection settings for a remote content source.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the GraphQL endpoint.
pub const ENDPOINT_ENV: &str = "RICHPOST_ENDPOINT";
/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "RICHPOST_TOKEN";
/// Timeout applied to a whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a GraphQL content source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
}

impl SourceConfig {
    /// Create a configuration for an endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into().trim().to_string();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(Error::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }
        Ok(Self {
            endpoint,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read `RICHPOST_ENDPOINT` and the optional `RICHPOST_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var(ENDPOINT_ENV)
            .map_err(|_| Error::Config(format!("{} is not set", ENDPOINT_ENV)))?;
        let config = Self::new(endpoint)?;
        Ok(match env::var(TOKEN_ENV) {
            Ok(token) => config.with_token(token),
            Err(_) => config,
        })
    }

    /// Set a bearer token. Blank tokens are ignored.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
