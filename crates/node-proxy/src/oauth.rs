//! Bearer tokens for panel → daemon calls.
//!
//! The panel authenticates itself with the `client_credentials` grant of its
//! OAuth2 token endpoint and reuses the token until shortly before it expires.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::OAuthConfig;

/// A cached token is replaced once fewer than this many seconds remain.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token request rejected ({status}): {error}")]
    Rejected {
        status: u16,
        error: String,
        description: Option<String>,
    },

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, TokenError>;
}

/// Fixed token taken from configuration.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider(String);

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        TimeDelta::try_seconds(EXPIRY_MARGIN_SECS)
            .and_then(|margin| now.checked_add_signed(margin))
            .is_some_and(|deadline| deadline < self.expires_at)
    }
}

/// Instant a token issued at `now` stops being valid. Lifetimes beyond chrono's range are clamped.
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    TimeDelta::try_seconds(expires_in.max(0))
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub struct OAuthTokenProvider {
    client: Client,
    config: OAuthConfig,
    cached: Mutex<Option<CachedToken>>,
}

impl OAuthTokenProvider {
    pub fn new(client: Client, config: OAuthConfig) -> Self {
        Self {
            client,
            config,
            cached: Mutex::new(None),
        }
    }

    async fn request_token(&self) -> Result<CachedToken, TokenError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (error, description) = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) => (parsed.error, parsed.error_description),
                Err(_) => (body, None),
            };
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                error,
                description,
            });
        }

        let token: TokenResponse = response.json().await?;
        info!(
            client_id = %self.config.client_id,
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            scope = token.scope.as_deref().unwrap_or(""),
            expires_in = token.expires_in,
            "obtained panel access token"
        );

        Ok(CachedToken {
            value: token.access_token,
            expires_at: expiry_after(Utc::now(), token.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for OAuthTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(Utc::now())) {
            debug!("reusing cached panel access token");
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
