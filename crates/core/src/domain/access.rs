use super::{Capability, Session};

pub trait PermissionChecker: Send + Sync {
    fn has_permission(&self, session: &Session, capability: Capability) -> bool;
}

pub trait XsrfValidator: Send + Sync {
    fn validate(&self, session: &Session, supplied: Option<&str>) -> bool;
}

/// Grants exactly the capabilities recorded on the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionPermissions;

impl PermissionChecker for SessionPermissions {
    fn has_permission(&self, session: &Session, capability: Capability) -> bool {
        session.permissions.contains(&capability)
    }
}

/// Compares the supplied token against the one bound to the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionXsrf;

impl XsrfValidator for SessionXsrf {
    fn validate(&self, session: &Session, supplied: Option<&str>) -> bool {
        let Some(supplied) = supplied else {
            return false;
        };
        if supplied.is_empty() || session.xsrf_token.is_empty() {
            return false;
        }
        constant_time_eq(supplied.as_bytes(), session.xsrf_token.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
