use serde::{Deserialize, Serialize};
use std::fmt;

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identifies one widget mount (one page load) in log output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetSessionId(String);

impl WidgetSessionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight hex digits, enough to tell mounts apart in logs.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl Default for WidgetSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_v4_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(WidgetSessionId::new(), WidgetSessionId::new());
    }

    #[test]
    fn short_form_is_hex_prefix() {
        let sid = WidgetSessionId::new();
        assert_eq!(sid.short().len(), 8);
        assert!(sid.short().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sid.as_str().starts_with(sid.short()));
    }

    #[test]
    fn display_matches_as_str() {
        let sid = WidgetSessionId::default();
        assert_eq!(sid.to_string(), sid.as_str());
    }
}
