//! Deterministic ID generation using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A deterministic ID derived from a content hash.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Generate an EntityId from input fields.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        Self::from_digest(hasher.finalize().as_slice())
    }

    /// Generate an EntityId from an arbitrary byte payload.
    pub fn from_content(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self::from_digest(hasher.finalize().as_slice())
    }

    fn from_digest(digest: &[u8]) -> Self {
        let hash = hex::encode(digest);
        Self(hash[..16].to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type alias for series IDs
pub type SeriesId = EntityId;

/// Fingerprint of a game log snapshot
pub type SnapshotId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_id_deterministic() {
        let id1 = EntityId::generate(&["LG", "KIA", "2025-04-01", "home"]);
        let id2 = EntityId::generate(&["LG", "KIA", "2025-04-01", "home"]);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_home_and_away_series_differ() {
        let home = EntityId::generate(&["LG", "KIA", "2025-04-01", "home"]);
        let away = EntityId::generate(&["LG", "KIA", "2025-04-01", "away"]);
        assert_ne!(home, away);
    }

    #[test]
    fn test_field_separator_matters() {
        let id1 = EntityId::generate(&["ab", "c"]);
        let id2 = EntityId::generate(&["a", "bc"]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entity_id_length_and_hex() {
        let id = EntityId::generate(&["NC", "SSG"]);
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_id_tracks_payload() {
        let a = EntityId::from_content(b"[1,2,3]");
        let b = EntityId::from_content(b"[1,2,3]");
        let c = EntityId::from_content(b"[1,2,3,4]");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 16);
    }

    #[test]
    fn test_entity_id_serialization() {
        let id = EntityId::generate(&["test"]);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_entity_id_display_and_debug() {
        let id = EntityId::from("abc123def456");
        assert_eq!(format!("{}", id), "abc123def456");
        assert!(format!("{:?}", id).contains("abc123def456"));
    }
}
