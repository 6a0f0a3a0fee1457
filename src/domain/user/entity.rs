//! User entity and related types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::{validate_user_id, UserValidationError};

/// User identifier - non-empty, no whitespace, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in the matching system.
///
/// Profile attributes are opaque to the engine; the exclusion set records
/// every user this one must never be grouped with again. It only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    id: UserId,
    /// Opaque profile attributes
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    profile: Map<String, Value>,
    /// Users this one must not be grouped with again
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    excluded: BTreeSet<UserId>,
}

impl User {
    /// Create a new user with an empty exclusion set
    pub fn new(id: UserId, profile: Map<String, Value>) -> Self {
        Self {
            id,
            profile,
            excluded: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn profile(&self) -> &Map<String, Value> {
        &self.profile
    }

    pub fn excluded(&self) -> &BTreeSet<UserId> {
        &self.excluded
    }

    /// Merge profile attributes in place, overwriting existing keys
    pub fn merge_profile(&mut self, profile: Map<String, Value>) {
        self.profile.extend(profile);
    }

    /// Record an exclusion against another user. Self-exclusion is ignored.
    pub fn exclude(&mut self, other: &UserId) {
        if *other != self.id {
            self.excluded.insert(other.clone());
        }
    }

    /// Check whether another user is excluded
    pub fn is_excluded(&self, other: &UserId) -> bool {
        self.excluded.contains(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn profile(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("alice").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("has space").is_err());
        assert!(UserId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn test_user_id_serde_round_trip() {
        let id = uid("alice-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"alice-1\"");

        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_user_id_deserialize_invalid() {
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }

    #[test]
    fn test_merge_profile_overwrites_keys() {
        let mut user = User::new(uid("alice"), profile(&[("skill", json!("rust"))]));
        user.merge_profile(profile(&[("skill", json!("go")), ("years", json!(3))]));

        assert_eq!(user.profile()["skill"], json!("go"));
        assert_eq!(user.profile()["years"], json!(3));
    }

    #[test]
    fn test_exclude_is_monotonic() {
        let mut user = User::new(uid("alice"), Map::new());
        user.exclude(&uid("bob"));
        user.exclude(&uid("carol"));
        user.exclude(&uid("bob"));

        assert_eq!(user.excluded().len(), 2);
        assert!(user.is_excluded(&uid("bob")));
        assert!(user.is_excluded(&uid("carol")));
    }

    #[test]
    fn test_self_exclusion_ignored() {
        let mut user = User::new(uid("alice"), Map::new());
        user.exclude(&uid("alice"));
        assert!(user.excluded().is_empty());
    }
}
