use std::collections::HashSet;

use super::{Capability, SessionId};

/// Network location of the node daemon that owns a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddress {
    pub fqdn: String,
    pub port: u16,
}

/// Managed game server a request operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRef {
    pub hash: String,
    pub node: NodeAddress,
}

impl ServerRef {
    pub fn new(hash: impl Into<String>, fqdn: impl Into<String>, port: u16) -> Self {
        Self {
            hash: hash.into(),
            node: NodeAddress {
                fqdn: fqdn.into(),
                port,
            },
        }
    }
}

/// Authenticated session as handed over by the panel. Read-only while a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub server: ServerRef,
    pub permissions: HashSet<Capability>,
    pub xsrf_token: String,
}

impl Session {
    pub fn new(server: ServerRef, xsrf_token: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            server,
            permissions: HashSet::new(),
            xsrf_token: xsrf_token.into(),
        }
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Capability>) -> Self {
        self.permissions.extend(permissions);
        self
    }
}
