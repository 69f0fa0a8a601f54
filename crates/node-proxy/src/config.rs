use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::{ProxyError, Result};

/// How the panel reaches node daemons and authenticates against them.
#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    #[serde(default)]
    pub daemon: DaemonConfig,
    pub auth: AuthConfig,
}

impl ProxyConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.auth.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DaemonConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Nodes commonly run with self-signed certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl DaemonConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

/// Source of the bearer token sent to daemons. Exactly one must be set.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub oauth: Option<OAuthConfig>,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        match (&self.access_token, &self.oauth) {
            (Some(_), Some(_)) => Err(ProxyError::Config(
                "auth.access_token and auth.oauth are mutually exclusive".to_string(),
            )),
            (None, None) => Err(ProxyError::Config(
                "either auth.access_token or auth.oauth must be configured".to_string(),
            )),
            (Some(token), None) if token.trim().is_empty() => Err(ProxyError::Config(
                "auth.access_token must not be empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
