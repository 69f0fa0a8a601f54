use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Named permission a session must hold before a file operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    View,
    Save,
    Delete,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::View, Capability::Save, Capability::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::View => "files.view",
            Capability::Save => "files.save",
            Capability::Delete => "files.delete",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|capability| capability.as_str() == s.trim())
            .ok_or_else(|| DomainError::UnknownCapability(s.to_string()))
    }
}
