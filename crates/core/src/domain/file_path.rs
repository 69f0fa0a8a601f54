use std::collections::BTreeSet;

use super::PathError;

/// A location below a server's file root, split into directory and file name.
///
/// `directory` is either empty or ends with exactly one `/`; it never starts with one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath {
    directory: String,
    basename: String,
}

impl FilePath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let mut segments = segments(raw)?;
        let basename = segments.pop().ok_or(PathError::Empty)?;

        Ok(Self {
            directory: join_directory(&segments),
            basename: basename.to_string(),
        })
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn extension(&self) -> Option<&str> {
        match self.basename.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Path as the daemon expects it, relative to the server root.
    pub fn remote_path(&self) -> String {
        format!("{}{}", self.directory, self.basename)
    }
}

/// Normalizes a directory request to `""` (root) or `a/b/`.
pub fn normalize_directory(raw: &str) -> Result<String, PathError> {
    let segments = segments(raw)?;
    Ok(join_directory(&segments))
}

fn segments(raw: &str) -> Result<Vec<&str>, PathError> {
    if raw.contains('\0') {
        return Err(PathError::InvalidCharacter);
    }

    let mut out = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(PathError::Traversal),
            other => out.push(other),
        }
    }
    Ok(out)
}

fn join_directory(segments: &[&str]) -> String {
    if segments.is_empty() {
        String::new()
    } else {
        format!("{}/", segments.join("/"))
    }
}

/// Extensions the panel lets users open in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableExtensions(BTreeSet<String>);

impl EditableExtensions {
    pub const DEFAULT: [&'static str; 20] = [
        "txt",
        "yml",
        "yaml",
        "log",
        "conf",
        "config",
        "html",
        "json",
        "properties",
        "props",
        "cfg",
        "lang",
        "ini",
        "cmd",
        "sh",
        "lua",
        "0",
        "toml",
        "xml",
        "md",
    ];

    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(&extension.to_ascii_lowercase())
    }

    pub fn allows(&self, path: &FilePath) -> bool {
        path.extension().is_some_and(|ext| self.contains(ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for EditableExtensions {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}
