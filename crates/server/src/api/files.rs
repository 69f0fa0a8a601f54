//! 文件管理 ajax 路由。
//!
//! 删除、保存、列目录三个端点，全部转发给服务器所在节点的守护进程。

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::Html,
    routing::post,
};
use node_files_api_types::{DeleteFileForm, DirectoryForm, SaveFileForm};
use node_files_core::SaveRequest;
use tracing::{debug, info};

use super::{ApiError, AppState, CurrentSession};
use crate::render::DirectoryView;

/// 创建文件管理路由。
pub fn create_files_router() -> Router<Arc<AppState>> {
    Router::new()
        // 删除文件或目录
        .route("/node/ajax/files/delete", post(delete_file))
        // 保存编辑器内容
        .route("/node/ajax/files/save", post(save_file))
        // 列出目录内容
        .route("/node/ajax/files/directory", post(list_directory))
}

/// 表单字段列表。
///
/// 请求体无法解析时按空表单处理，由 `FileManager` 在权限检查之后报告缺少参数。
type FormPairs = Result<Form<Vec<(String, String)>>, FormRejection>;

fn form_pairs(form: FormPairs) -> Vec<(String, String)> {
    match form {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable form body");
            Vec::new()
        }
    }
}

/// 删除文件。
async fn delete_file(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    form: FormPairs,
) -> Result<&'static str, ApiError> {
    let form = DeleteFileForm::from_pairs(&form_pairs(form));
    state
        .files
        .delete(&session, form.delete_item_path.as_deref())
        .await
        .map_err(ApiError::from_delete)?;
    Ok("ok")
}

/// 保存文件内容。
async fn save_file(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    form: FormPairs,
) -> Result<Html<String>, ApiError> {
    let form = SaveFileForm::from_pairs(&form_pairs(form));
    let request = SaveRequest {
        xsrf: form.xsrf.as_deref(),
        file: form.file.as_deref(),
        contents: form.file_contents,
    };
    let saved = state
        .files
        .save(&session, request)
        .await
        .map_err(ApiError::from_save)?;

    info!(server = %session.server.hash, path = %saved.remote_path(), "file saved");
    Ok(Html(state.renderer.saved()))
}

/// 列出目录并渲染为 HTML 片段。
async fn list_directory(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    form: FormPairs,
) -> Result<Html<String>, ApiError> {
    let form = DirectoryForm::from_pairs(&form_pairs(form));
    let listing = state
        .files
        .list_directory(&session, form.dir.as_deref())
        .await
        .map_err(ApiError::from_directory)?;

    let view = DirectoryView::new(&listing, state.files.editable_extensions());
    Ok(Html(state.renderer.directory(&view)))
}
