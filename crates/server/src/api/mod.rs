//! API 路由模块。
//!
//! 面板文件管理器调用的 ajax 端点。

pub mod error;
pub mod extract;
pub mod files;
pub mod state;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use node_files_api_types::HealthCheckResponse;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use extract::CurrentSession;
pub use files::create_files_router;
pub use state::AppState;

/// 组装完整的应用路由。
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(create_files_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
