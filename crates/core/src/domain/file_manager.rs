use std::sync::Arc;

use tracing::{info, warn};

use super::{
    Capability, DirectoryListing, EditableExtensions, FilePath, FilesError, NodeFiles, ParentLink,
    PermissionChecker, Session, SessionPermissions, SessionXsrf, XsrfValidator,
    normalize_directory,
};

/// Raw parameters of a save request, before any validation.
#[derive(Debug, Clone, Default)]
pub struct SaveRequest<'a> {
    pub xsrf: Option<&'a str>,
    pub file: Option<&'a str>,
    pub contents: Option<String>,
}

/// Runs the gate → validate → normalize → remote call sequence for each file operation.
pub struct FileManager {
    remote: Arc<dyn NodeFiles>,
    permissions: Arc<dyn PermissionChecker>,
    xsrf: Arc<dyn XsrfValidator>,
    editable: EditableExtensions,
}

impl FileManager {
    pub fn new(remote: Arc<dyn NodeFiles>, editable: EditableExtensions) -> Self {
        Self {
            remote,
            permissions: Arc::new(SessionPermissions),
            xsrf: Arc::new(SessionXsrf),
            editable,
        }
    }

    pub fn with_access(
        mut self,
        permissions: Arc<dyn PermissionChecker>,
        xsrf: Arc<dyn XsrfValidator>,
    ) -> Self {
        self.permissions = permissions;
        self.xsrf = xsrf;
        self
    }

    pub fn editable_extensions(&self) -> &EditableExtensions {
        &self.editable
    }

    fn require(&self, session: &Session, capability: Capability) -> Result<(), FilesError> {
        if self.permissions.has_permission(session, capability) {
            Ok(())
        } else {
            warn!(session = %session.id, %capability, "permission denied");
            Err(FilesError::Forbidden(capability))
        }
    }

    pub async fn delete(
        &self,
        session: &Session,
        raw_path: Option<&str>,
    ) -> Result<(), FilesError> {
        self.require(session, Capability::Delete)?;

        let raw_path = raw_path
            .filter(|p| !p.is_empty())
            .ok_or(FilesError::MissingParameters)?;
        let path = FilePath::parse(raw_path)?;
        let remote_path = path.remote_path();

        info!(server = %session.server.hash, path = %remote_path, "deleting file");
        self.remote
            .delete_file(&session.server, &remote_path)
            .await?;
        Ok(())
    }

    pub async fn save(
        &self,
        session: &Session,
        request: SaveRequest<'_>,
    ) -> Result<FilePath, FilesError> {
        self.require(session, Capability::Save)?;

        if !self.xsrf.validate(session, request.xsrf) {
            warn!(session = %session.id, "rejected save with invalid xsrf token");
            return Err(FilesError::InvalidXsrf);
        }

        let raw_path = request.file.filter(|f| !f.is_empty());
        let (Some(raw_path), Some(contents)) = (raw_path, request.contents) else {
            return Err(FilesError::MissingParameters);
        };

        let path = FilePath::parse(raw_path)?;
        if !self.editable.allows(&path) {
            return Err(FilesError::NotEditable(path.extension().map(str::to_string)));
        }

        let remote_path = path.remote_path();
        info!(
            server = %session.server.hash,
            path = %remote_path,
            bytes = contents.len(),
            "saving file"
        );
        self.remote
            .save_file(&session.server, &remote_path, contents)
            .await?;
        Ok(path)
    }

    pub async fn list_directory(
        &self,
        session: &Session,
        dir: Option<&str>,
    ) -> Result<DirectoryListing, FilesError> {
        self.require(session, Capability::View)?;

        let directory = normalize_directory(dir.unwrap_or_default())?;
        let parent = ParentLink::compute(&directory);

        info!(server = %session.server.hash, directory = %directory, "listing directory");
        let contents = self
            .remote
            .list_directory(&session.server, &directory)
            .await?;

        Ok(DirectoryListing {
            contents,
            header: (!directory.is_empty()).then(|| directory.clone()),
            parent,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{DirectoryContents, RemoteEntry, RemoteError, ServerRef};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Delete(String),
        Save(String, String),
        List(String),
    }

    #[derive(Default)]
    struct RecordingNode {
        calls: Mutex<Vec<Call>>,
        failure: Option<RemoteError>,
    }

    impl RecordingNode {
        fn failing(failure: RemoteError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: Some(failure),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn answer(&self) -> Result<(), RemoteError> {
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl NodeFiles for RecordingNode {
        async fn delete_file(&self, _server: &ServerRef, path: &str) -> Result<(), RemoteError> {
            self.calls.lock().unwrap().push(Call::Delete(path.to_string()));
            self.answer()
        }

        async fn save_file(
            &self,
            _server: &ServerRef,
            path: &str,
            contents: String,
        ) -> Result<(), RemoteError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Save(path.to_string(), contents));
            self.answer()
        }

        async fn list_directory(
            &self,
            _server: &ServerRef,
            directory: &str,
        ) -> Result<DirectoryContents, RemoteError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::List(directory.to_string()));
            self.answer()?;
            Ok(DirectoryContents::new(
                vec![RemoteEntry::named("server.properties")],
                vec![RemoteEntry::named("plugins")],
            ))
        }
    }

    fn session(permissions: &[Capability]) -> Session {
        Session::new(ServerRef::new("srv-hash", "node.local", 5656), "xsrf-token")
            .with_permissions(permissions.iter().copied())
    }

    fn manager(node: &Arc<RecordingNode>) -> FileManager {
        FileManager::new(node.clone(), EditableExtensions::default())
    }

    fn save_request<'a>(xsrf: &'a str, file: &'a str, contents: &str) -> SaveRequest<'a> {
        SaveRequest {
            xsrf: Some(xsrf),
            file: Some(file),
            contents: Some(contents.to_string()),
        }
    }

    #[test]
    fn missing_capability_never_reaches_the_node() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[]);

        let delete = tokio_test::block_on(files.delete(&session, Some("a.txt")));
        let save = tokio_test::block_on(files.save(&session, save_request("xsrf-token", "a.txt", "x")));
        let list = tokio_test::block_on(files.list_directory(&session, None));

        assert_eq!(delete, Err(FilesError::Forbidden(Capability::Delete)));
        assert_eq!(save, Err(FilesError::Forbidden(Capability::Save)));
        assert_eq!(list, Err(FilesError::Forbidden(Capability::View)));
        assert!(node.calls().is_empty());
    }

    #[test]
    fn save_with_bad_xsrf_is_rejected_before_validation() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::Save]);

        let result = tokio_test::block_on(files.save(
            &session,
            SaveRequest {
                xsrf: Some("forged"),
                file: None,
                contents: None,
            },
        ));

        assert_eq!(result, Err(FilesError::InvalidXsrf));
        assert!(node.calls().is_empty());
    }

    #[test]
    fn save_requires_file_and_contents() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::Save]);

        let result = tokio_test::block_on(files.save(
            &session,
            SaveRequest {
                xsrf: Some("xsrf-token"),
                file: Some("eula.txt"),
                contents: None,
            },
        ));

        assert_eq!(result, Err(FilesError::MissingParameters));
        assert!(node.calls().is_empty());
    }

    #[test]
    fn save_of_non_editable_extension_never_issues_put() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::Save]);

        let result =
            tokio_test::block_on(files.save(&session, save_request("xsrf-token", "server.jar", "x")));

        assert_eq!(result, Err(FilesError::NotEditable(Some("jar".to_string()))));
        assert!(node.calls().is_empty());
    }

    #[test]
    fn save_sends_normalized_path_and_contents() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::Save]);

        let saved = tokio_test::block_on(files.save(
            &session,
            save_request("xsrf-token", "./plugins/Essentials/config.yml", "motd: hi\n"),
        ))
        .expect("save should succeed");

        assert_eq!(saved.directory(), "plugins/Essentials/");
        assert_eq!(
            node.calls(),
            vec![Call::Save(
                "plugins/Essentials/config.yml".to_string(),
                "motd: hi\n".to_string()
            )]
        );
    }

    #[test]
    fn save_allows_empty_contents() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::Save]);

        let result = tokio_test::block_on(files.save(&session, save_request("xsrf-token", "a.txt", "")));
        assert!(result.is_ok());
    }

    #[test]
    fn traversal_is_rejected_before_remote_call() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&Capability::ALL);

        let delete = tokio_test::block_on(files.delete(&session, Some("../../etc/passwd")));
        let list = tokio_test::block_on(files.list_directory(&session, Some("plugins/../..")));

        assert!(matches!(delete, Err(FilesError::InvalidPath(_))));
        assert!(matches!(list, Err(FilesError::InvalidPath(_))));
        assert!(node.calls().is_empty());
    }

    #[test]
    fn delete_without_path_is_missing_parameters() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::Delete]);

        let result = tokio_test::block_on(files.delete(&session, Some("")));
        assert_eq!(result, Err(FilesError::MissingParameters));
        assert!(node.calls().is_empty());
    }

    #[test]
    fn delete_surfaces_daemon_failure() {
        let failure = RemoteError::Status {
            status: 404,
            body: "no such file".to_string(),
            message: None,
        };
        let node = Arc::new(RecordingNode::failing(failure.clone()));
        let files = manager(&node);
        let session = session(&[Capability::Delete]);

        let result = tokio_test::block_on(files.delete(&session, Some("/world/level.dat")));

        assert_eq!(result, Err(FilesError::Remote(failure)));
        assert_eq!(node.calls(), vec![Call::Delete("world/level.dat".to_string())]);
    }

    #[test]
    fn listing_carries_parent_and_header() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::View]);

        let listing = tokio_test::block_on(files.list_directory(&session, Some("/plugins/Essentials/")))
            .expect("listing should succeed");

        assert_eq!(listing.header.as_deref(), Some("plugins/Essentials/"));
        assert_eq!(listing.parent.link.as_deref(), Some("plugins"));
        assert!(listing.parent.first);
        assert_eq!(listing.contents.folders[0].name, "plugins");
        assert_eq!(node.calls(), vec![Call::List("plugins/Essentials/".to_string())]);
    }

    #[test]
    fn root_listing_has_no_header() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node);
        let session = session(&[Capability::View]);

        let listing = tokio_test::block_on(files.list_directory(&session, Some("/")))
            .expect("listing should succeed");

        assert_eq!(listing.header, None);
        assert_eq!(listing.parent, ParentLink::default());
    }

    struct DenyAll;

    impl PermissionChecker for DenyAll {
        fn has_permission(&self, _session: &Session, _capability: Capability) -> bool {
            false
        }
    }

    #[test]
    fn injected_permission_checker_overrides_session_scopes() {
        let node = Arc::new(RecordingNode::default());
        let files = manager(&node).with_access(Arc::new(DenyAll), Arc::new(SessionXsrf));
        let session = session(&Capability::ALL);

        let result = tokio_test::block_on(files.list_directory(&session, None));
        assert_eq!(result, Err(FilesError::Forbidden(Capability::View)));
        assert!(node.calls().is_empty());
    }
}
