use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, bail};
use node_files_core::{Capability, EditableExtensions, ServerRef, Session, SessionId};
use node_proxy::{AuthConfig, DaemonConfig, ProxyConfig};
use serde::Deserialize;

type Result<T> = anyhow::Result<T>;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    #[serde(default)]
    pub editable_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub daemon: DaemonConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub sessions: Vec<SessionConfig>,
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("failed to deserialize server config")?;
        config.auth.validate()?;
        Ok(config)
    }

    pub fn proxy(&self) -> ProxyConfig {
        ProxyConfig {
            daemon: self.daemon.clone(),
            auth: self.auth.clone(),
        }
    }

    pub fn editable(&self) -> EditableExtensions {
        match &self.editable_extensions {
            Some(list) => EditableExtensions::new(list),
            None => EditableExtensions::default(),
        }
    }
}

/// Session provisioned up front for a standalone deployment.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub id: String,
    pub xsrf_token: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub server_hash: String,
    pub node_fqdn: String,
    pub node_port: u16,
}

impl SessionConfig {
    pub fn to_session(&self) -> Result<Session> {
        let id: SessionId = self
            .id
            .parse()
            .with_context(|| format!("invalid session id: {}", self.id))?;
        if self.xsrf_token.trim().is_empty() {
            bail!("session {} has an empty xsrf_token", self.id);
        }

        let permissions = self
            .permissions
            .iter()
            .map(|name| name.parse::<Capability>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("invalid permissions for session {}", self.id))?;

        let mut session = Session::new(
            ServerRef::new(&self.server_hash, &self.node_fqdn, self.node_port),
            &self.xsrf_token,
        )
        .with_permissions(permissions);
        session.id = id;
        Ok(session)
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use node_files_core::Capability;

    const RAW: &str = r#"
bind = "0.0.0.0:9000"
editable_extensions = ["yml", "properties"]

[daemon]
timeout_secs = 4

[auth]
access_token = "panel-token"

[[sessions]]
id = "6f1c2a5e-0a43-4c6e-9d7a-3f1a9c1d2b10"
xsrf_token = "xsrf-abc"
permissions = ["files.view", "files.save"]
server_hash = "a1b2c3"
node_fqdn = "node1.example.com"
node_port = 5656
"#;

    #[test]
    fn test_parse_config() {
        let config = ServerConfig::from_str(RAW).expect("config should parse");
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.daemon.timeout_secs, 4);
        assert_eq!(config.daemon.scheme, "https");
        assert_eq!(config.sessions.len(), 1);

        let editable = config.editable();
        assert!(editable.contains("yml"));
        assert!(!editable.contains("txt"));

        let session = config.sessions[0].to_session().expect("session should build");
        assert_eq!(session.id.to_string(), "6f1c2a5e-0a43-4c6e-9d7a-3f1a9c1d2b10");
        assert_eq!(session.server.hash, "a1b2c3");
        assert_eq!(session.server.node.port, 5656);
        assert!(session.permissions.contains(&Capability::Save));
        assert!(!session.permissions.contains(&Capability::Delete));
    }

    #[test]
    fn defaults_apply_when_sections_are_missing() {
        let config = ServerConfig::from_str("[auth]\naccess_token = \"t\"\n")
            .expect("config should parse");
        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
        assert!(config.sessions.is_empty());
        assert!(config.editable().contains("txt"));
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let raw = RAW.replace("\"files.save\"", "\"files.rename\"");
        let config = ServerConfig::from_str(&raw).expect("config should parse");
        assert!(config.sessions[0].to_session().is_err());
    }
}
