//! Session lookup for incoming requests.

use std::collections::HashMap;

use async_trait::async_trait;
use node_files_core::{Session, SessionId};
use tokio::sync::RwLock;

use crate::config::SessionConfig;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &SessionId) -> Option<Session>;

    async fn insert(&self, session: Session);
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(configs: &[SessionConfig]) -> anyhow::Result<Self> {
        let sessions = configs
            .iter()
            .map(|config| config.to_session().map(|session| (session.id, session)))
            .collect::<anyhow::Result<HashMap<_, _>>>()?;
        Ok(Self {
            sessions: RwLock::new(sessions),
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn insert(&self, session: Session) {
        self.sessions.write().await.insert(session.id, session);
    }
}
