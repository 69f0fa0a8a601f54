use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of an authenticated panel session, carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::SessionId;

    #[test]
    fn session_id_can_roundtrip_from_string() {
        let id = SessionId::new();
        let parsed: SessionId = id
            .to_string()
            .parse()
            .expect("generated session id should be valid");

        assert_eq!(id, parsed);
    }

    #[test]
    fn malformed_session_id_is_rejected() {
        assert!("not-a-session".parse::<SessionId>().is_err());
    }
}
