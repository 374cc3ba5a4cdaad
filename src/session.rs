// src/session.rs

use std::fmt;
use uuid::Uuid;

/// Opaque conversation token. Generated once when the widget comes up and
/// attached to every outbound request so the remote service can correlate
/// the conversation. Never regenerated, never persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_uuid() {
        let id = SessionId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn generate_produces_unique_ids() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
