pub mod client;
pub mod config;
pub mod error;
pub mod oauth;

pub use client::DaemonClient;
pub use config::{AuthConfig, DaemonConfig, OAuthConfig, ProxyConfig};
pub use error::{ProxyError, Result};
pub use oauth::{AccessTokenProvider, OAuthTokenProvider, StaticTokenProvider, TokenError};
