//! 统一的应用状态。

use std::sync::Arc;

use node_files_core::FileManager;

use crate::render::{FragmentRenderer, HtmlRenderer};
use crate::session::SessionStore;

/// 统一的应用状态，包含所有 handler 共享的服务。
pub struct AppState {
    /// 文件操作编排（权限、XSRF、路径、远程调用）。
    pub files: FileManager,
    /// 会话存储。
    pub sessions: Arc<dyn SessionStore>,
    /// HTML 片段渲染器。
    pub renderer: Arc<dyn FragmentRenderer>,
}

impl AppState {
    /// 使用默认 HTML 渲染器创建应用状态。
    pub fn new(files: FileManager, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            files,
            sessions,
            renderer: Arc::new(HtmlRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn FragmentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }
}
