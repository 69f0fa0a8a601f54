//! 从请求中解析当前会话。

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use node_files_core::{Session, SessionId};
use tracing::debug;

use super::{ApiError, AppState};

/// 会话 cookie 名称。
pub const SESSION_COOKIE: &str = "panel_session";

/// 当前请求所属的已认证会话。
pub struct CurrentSession(pub Session);

impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(id) = session_cookie(&parts.headers).and_then(|raw| raw.parse::<SessionId>().ok())
        else {
            debug!("request without a usable session cookie");
            return Err(ApiError::unauthenticated());
        };

        match state.sessions.get(&id).await {
            Some(session) => Ok(CurrentSession(session)),
            None => {
                debug!(session = %id, "unknown session");
                Err(ApiError::unauthenticated())
            }
        }
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim_matches('"'))
}
