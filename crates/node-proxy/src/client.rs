//! HTTP client for the file endpoints of a node daemon.
//!
//! Every call authenticates with a bearer token and maps the daemon's answer
//! onto [`RemoteError`]; transport problems are logged here and never passed on verbatim.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use node_files_core::{DirectoryContents, NodeFiles, RemoteEntry, RemoteError, ServerRef};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::{
    AccessTokenProvider, DaemonConfig, OAuthTokenProvider, ProxyConfig, ProxyError, Result,
    StaticTokenProvider,
};

pub struct DaemonClient {
    http: Client,
    scheme: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

/// Error payload the daemon attaches to failed requests.
#[derive(Debug, Deserialize)]
struct DaemonMessage {
    message: String,
}

/// Directory entry as listed by the daemon.
#[derive(Debug, Deserialize)]
struct DaemonEntry {
    name: String,
    file: bool,
    #[serde(default)]
    size: Option<u64>,
    /// Unix seconds.
    #[serde(default)]
    modified: Option<i64>,
}

impl DaemonClient {
    pub fn new(config: &DaemonConfig, tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        Ok(Self::with_http(build_http(config)?, &config.scheme, tokens))
    }

    pub fn with_http(http: Client, scheme: &str, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            http,
            scheme: scheme.to_string(),
            tokens,
        }
    }

    /// Builds the client and its token source from one configuration.
    pub fn from_config(config: &ProxyConfig) -> Result<Self> {
        config.auth.validate()?;
        let http = build_http(&config.daemon)?;

        let tokens: Arc<dyn AccessTokenProvider> =
            match (&config.auth.access_token, &config.auth.oauth) {
                (Some(token), _) => Arc::new(StaticTokenProvider::new(token.clone())),
                (None, Some(oauth)) => Arc::new(OAuthTokenProvider::new(http.clone(), oauth.clone())),
                (None, None) => {
                    return Err(ProxyError::Config("no access token source".to_string()));
                }
            };

        info!(
            scheme = %config.daemon.scheme,
            timeout_secs = config.daemon.timeout_secs,
            "daemon client configured"
        );
        Ok(Self::with_http(http, &config.daemon.scheme, tokens))
    }

    fn base_url(&self, server: &ServerRef) -> String {
        format!(
            "{}://{}:{}/server/{}",
            self.scheme,
            server.node.fqdn,
            server.node.port,
            urlencoding::encode(&server.hash)
        )
    }

    pub fn file_url(&self, server: &ServerRef, path: &str) -> String {
        format!("{}/file/{}", self.base_url(server), urlencoding::encode(path))
    }

    pub fn directory_url(&self, server: &ServerRef, directory: &str) -> String {
        format!(
            "{}/directory/{}",
            self.base_url(server),
            urlencoding::encode(directory)
        )
    }

    /// Attaches the bearer token and sends the request.
    async fn send(
        &self,
        server: &ServerRef,
        request: RequestBuilder,
    ) -> std::result::Result<Response, RemoteError> {
        let token = self.tokens.access_token().await.map_err(|err| {
            error!(error = %err, "failed to obtain panel access token");
            RemoteError::Transport("access token unavailable".to_string())
        })?;

        request.bearer_auth(token).send().await.map_err(|err| {
            error!(
                error = %err,
                node = %server.node.fqdn,
                port = server.node.port,
                timeout = err.is_timeout(),
                "request to node daemon failed"
            );
            RemoteError::Transport(format!("could not connect to {}", server.node.fqdn))
        })
    }

    async fn expect_status(
        response: Response,
        expected: StatusCode,
    ) -> std::result::Result<Response, RemoteError> {
        if response.status() == expected {
            Ok(response)
        } else {
            Err(status_error(response).await)
        }
    }
}

fn build_http(config: &DaemonConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?)
}

async fn status_error(response: Response) -> RemoteError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<DaemonMessage>(&body)
        .ok()
        .map(|parsed| parsed.message);
    debug!(status, body = %body, "node daemon rejected request");
    RemoteError::Status {
        status,
        body,
        message,
    }
}

fn into_entry(entry: DaemonEntry) -> RemoteEntry {
    RemoteEntry {
        name: entry.name,
        size: entry.size,
        modified: entry
            .modified
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
    }
}

#[async_trait]
impl NodeFiles for DaemonClient {
    async fn delete_file(
        &self,
        server: &ServerRef,
        path: &str,
    ) -> std::result::Result<(), RemoteError> {
        let request = self.http.delete(self.file_url(server, path));
        let response = self.send(server, request).await?;
        Self::expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    async fn save_file(
        &self,
        server: &ServerRef,
        path: &str,
        contents: String,
    ) -> std::result::Result<(), RemoteError> {
        let request = self.http.put(self.file_url(server, path)).body(contents);
        let response = self.send(server, request).await?;
        Self::expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    async fn list_directory(
        &self,
        server: &ServerRef,
        directory: &str,
    ) -> std::result::Result<DirectoryContents, RemoteError> {
        let request = self.http.get(self.directory_url(server, directory));
        let response = self.send(server, request).await?;
        let response = Self::expect_status(response, StatusCode::OK).await?;

        let entries: Vec<DaemonEntry> = response.json().await.map_err(|err| {
            error!(error = %err, node = %server.node.fqdn, "unreadable directory listing");
            RemoteError::Transport("invalid directory listing".to_string())
        })?;

        let (files, folders): (Vec<_>, Vec<_>) = entries.into_iter().partition(|entry| entry.file);
        Ok(DirectoryContents::new(
            files.into_iter().map(into_entry).collect(),
            folders.into_iter().map(into_entry).collect(),
        ))
    }
}
