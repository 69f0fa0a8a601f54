//! API 错误类型及其到 HTTP 响应的映射。
//!
//! 三个文件端点对远程失败的措辞各不相同，因此每个端点有自己的构造函数。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use node_files_core::{FilesError, RemoteError};
use tracing::error;

/// API 错误：状态码加纯文本消息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "You must be logged in to perform this action.",
        )
    }

    pub fn from_delete(err: FilesError) -> Self {
        match err {
            FilesError::Remote(RemoteError::Status { status, body, .. }) => {
                Self::new(failure_status(status), body)
            }
            FilesError::Remote(RemoteError::Transport(detail)) => {
                error!(%detail, "delete failed before reaching the node");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to connect to the node to delete this item.",
                )
            }
            other => Self::from_validation(other),
        }
    }

    pub fn from_save(err: FilesError) -> Self {
        match err {
            FilesError::Remote(RemoteError::Transport(detail)) => {
                error!(%detail, "save failed before reaching the node");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error was encountered when trying to connect to the remote server to save this file.",
                )
            }
            FilesError::Remote(remote) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "An error occurred while trying to save this file. [{}]",
                    remote.daemon_message().unwrap_or("unknown error")
                ),
            ),
            other => Self::from_validation(other),
        }
    }

    pub fn from_directory(err: FilesError) -> Self {
        match err {
            FilesError::Remote(RemoteError::Transport(detail)) => {
                error!(%detail, "directory listing failed before reaching the node");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to connect to the node to list this directory.",
                )
            }
            FilesError::Remote(remote @ RemoteError::Status { status, .. }) => Self::new(
                failure_status(status),
                remote
                    .daemon_message()
                    .unwrap_or("The node could not list this directory.")
                    .to_string(),
            ),
            other => Self::from_validation(other),
        }
    }

    /// 请求在到达节点之前被拒绝的情况。
    fn from_validation(err: FilesError) -> Self {
        let status = match &err {
            FilesError::Forbidden(_) | FilesError::InvalidXsrf => StatusCode::FORBIDDEN,
            FilesError::MissingParameters
            | FilesError::InvalidPath(_)
            | FilesError::NotEditable(_) => StatusCode::BAD_REQUEST,
            FilesError::Remote(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

/// 节点返回的状态码；非错误码一律视为 502。
fn failure_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|code| code.is_client_error() || code.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
