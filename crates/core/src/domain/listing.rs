use chrono::{DateTime, Utc};

/// One entry reported by the daemon for a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

impl RemoteEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            modified: None,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match self.name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryContents {
    pub files: Vec<RemoteEntry>,
    pub folders: Vec<RemoteEntry>,
}

impl DirectoryContents {
    /// Builds the listing with both sequences ordered by name, ignoring case.
    pub fn new(mut files: Vec<RemoteEntry>, mut folders: Vec<RemoteEntry>) -> Self {
        files.sort_by_cached_key(|entry| entry.name.to_lowercase());
        folders.sort_by_cached_key(|entry| entry.name.to_lowercase());
        Self { files, folders }
    }
}

/// "Go up" navigation for a directory view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentLink {
    /// The view is below the root, so a link back to the root is shown.
    pub first: bool,
    /// Parent directory when it is not the root itself.
    pub link: Option<String>,
}

impl ParentLink {
    pub fn compute(requested_dir: &str) -> Self {
        let trimmed = requested_dir.trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        let link = if segments.len() > 1 && !segments[1].is_empty() {
            let parent = segments[..segments.len() - 1].join("/");
            Some(parent.trim_end_matches('/').to_string())
        } else {
            None
        };

        Self {
            first: !requested_dir.is_empty(),
            link,
        }
    }

    pub fn has_parent(&self) -> bool {
        self.link.is_some()
    }
}

/// Everything a directory view needs once the daemon has answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub contents: DirectoryContents,
    pub parent: ParentLink,
    /// Current directory as `a/b/`, or `None` at the root.
    pub header: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_directory_links_to_its_parent() {
        let parent = ParentLink::compute("a/b/c");
        assert!(parent.first);
        assert_eq!(parent.link.as_deref(), Some("a/b"));
    }

    #[test]
    fn surrounding_separators_do_not_change_parent() {
        let parent = ParentLink::compute("/a/b/c/");
        assert_eq!(parent.link.as_deref(), Some("a/b"));
    }

    #[test]
    fn single_segment_has_no_parent_link() {
        let parent = ParentLink::compute("a");
        assert!(parent.first);
        assert!(!parent.has_parent());
    }

    #[test]
    fn root_has_neither_link() {
        let parent = ParentLink::compute("");
        assert!(!parent.first);
        assert!(!parent.has_parent());
    }

    #[test]
    fn contents_are_sorted_case_insensitively() {
        let contents = DirectoryContents::new(
            vec![
                RemoteEntry::named("server.properties"),
                RemoteEntry::named("Banned-ips.json"),
                RemoteEntry::named("eula.txt"),
            ],
            vec![RemoteEntry::named("world"), RemoteEntry::named("Plugins")],
        );

        let files: Vec<_> = contents.files.iter().map(|e| e.name.as_str()).collect();
        let folders: Vec<_> = contents.folders.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(files, ["Banned-ips.json", "eula.txt", "server.properties"]);
        assert_eq!(folders, ["Plugins", "world"]);
    }

    #[test]
    fn entry_extension_uses_last_dot() {
        assert_eq!(RemoteEntry::named("backup.tar.gz").extension(), Some("gz"));
        assert_eq!(RemoteEntry::named("LICENSE").extension(), None);
    }
}
