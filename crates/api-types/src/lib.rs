//! Shared request/response types used by API-facing crates.
//!
//! Field names follow the form posts issued by the panel's file manager page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Value of the last occurrence of `name`; repeated form fields resolve to the final one.
fn last_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

/// Body of `POST /node/ajax/files/delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileForm {
    #[serde(rename = "deleteItemPath", default)]
    pub delete_item_path: Option<String>,
}

impl DeleteFileForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            delete_item_path: last_value(pairs, "deleteItemPath"),
        }
    }
}

/// Body of `POST /node/ajax/files/save`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFileForm {
    #[serde(default)]
    pub xsrf: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub file_contents: Option<String>,
}

impl SaveFileForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            xsrf: last_value(pairs, "xsrf"),
            file: last_value(pairs, "file"),
            file_contents: last_value(pairs, "file_contents"),
        }
    }
}

/// Body of `POST /node/ajax/files/directory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryForm {
    #[serde(default)]
    pub dir: Option<String>,
}

impl DirectoryForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            dir: last_value(pairs, "dir"),
        }
    }
}
