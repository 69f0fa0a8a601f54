use async_trait::async_trait;
use thiserror::Error;

use super::{DirectoryContents, ServerRef};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The daemon answered, but not with the status the operation expects.
    #[error("node responded with status {status}")]
    Status {
        status: u16,
        body: String,
        message: Option<String>,
    },
    /// No usable answer: connect, TLS, timeout or token failure.
    #[error("could not reach node: {0}")]
    Transport(String),
}

impl RemoteError {
    /// Best human-readable description the daemon gave, falling back to the raw body.
    pub fn daemon_message(&self) -> Option<&str> {
        match self {
            RemoteError::Status { message, body, .. } => {
                message.as_deref().or(Some(body.as_str()).filter(|b| !b.is_empty()))
            }
            RemoteError::Transport(_) => None,
        }
    }
}

/// File operations executed by a server's node daemon.
#[async_trait]
pub trait NodeFiles: Send + Sync {
    async fn delete_file(&self, server: &ServerRef, path: &str) -> Result<(), RemoteError>;

    async fn save_file(
        &self,
        server: &ServerRef,
        path: &str,
        contents: String,
    ) -> Result<(), RemoteError>;

    async fn list_directory(
        &self,
        server: &ServerRef,
        directory: &str,
    ) -> Result<DirectoryContents, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::RemoteError;

    #[test]
    fn daemon_message_prefers_structured_field() {
        let err = RemoteError::Status {
            status: 500,
            body: r#"{"message":"disk full"}"#.to_string(),
            message: Some("disk full".to_string()),
        };
        assert_eq!(err.daemon_message(), Some("disk full"));
    }

    #[test]
    fn daemon_message_falls_back_to_body() {
        let err = RemoteError::Status {
            status: 404,
            body: "not found".to_string(),
            message: None,
        };
        assert_eq!(err.daemon_message(), Some("not found"));

        let empty = RemoteError::Status {
            status: 502,
            body: String::new(),
            message: None,
        };
        assert_eq!(empty.daemon_message(), None);
        assert_eq!(RemoteError::Transport("refused".into()).daemon_message(), None);
    }
}
