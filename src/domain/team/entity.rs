//! Team entity and related types

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Team identifier - generated as `team-<uuid>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    /// Generate a fresh team ID
    pub fn generate() -> Self {
        Self(format!("team-{}", Uuid::new_v4().simple()))
    }

    /// Wrap an existing ID (for lookups from the transport layer)
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-member consensus feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// Member has not responded yet
    #[default]
    Pending,
    Agree,
    Disagree,
}

impl Feedback {
    /// Parse a submitted feedback value. Only `agree` and `disagree` are
    /// accepted from the outside; `pending` is the initial state, not an input.
    pub fn parse_submission(value: &str) -> Option<Self> {
        match value {
            "agree" => Some(Self::Agree),
            "disagree" => Some(Self::Disagree),
            _ => None,
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Agree => write!(f, "agree"),
            Self::Disagree => write!(f, "disagree"),
        }
    }
}

/// Status of a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    /// Team is collecting consensus feedback
    #[default]
    Forming,
    /// Every member agreed; the team is final
    Confirmed,
}

impl TeamStatus {
    pub fn is_forming(&self) -> bool {
        matches!(self, Self::Forming)
    }
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forming => write!(f, "forming"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// A bounded group of users progressing toward unanimous confirmation.
///
/// The feedback map always holds exactly the current member ids; every
/// mutator keeps the two in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Ordered member list
    members: Vec<UserId>,
    /// Per-member feedback, keyed by member id
    feedback: HashMap<UserId, Feedback>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Deadline after which non-responders are treated as decliners
    expires_at: DateTime<Utc>,
    /// Current status
    status: TeamStatus,
}

impl Team {
    /// Create a Forming team with all-pending feedback
    pub fn new(members: Vec<UserId>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let feedback = members
            .iter()
            .map(|id| (id.clone(), Feedback::Pending))
            .collect();

        Self {
            id: TeamId::generate(),
            members,
            feedback,
            created_at: now,
            expires_at: now + ttl,
            status: TeamStatus::Forming,
        }
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn feedback(&self) -> &HashMap<UserId, Feedback> {
        &self.feedback
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn status(&self) -> TeamStatus {
        self.status
    }

    pub fn is_member(&self, id: &UserId) -> bool {
        self.feedback.contains_key(id)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Members that have not responded yet
    pub fn pending_members(&self) -> Vec<UserId> {
        self.members_with(Feedback::Pending)
    }

    /// Members that declined the current composition
    pub fn disagreeing_members(&self) -> Vec<UserId> {
        self.members_with(Feedback::Disagree)
    }

    /// Members that accepted the current composition
    pub fn agreeing_members(&self) -> Vec<UserId> {
        self.members_with(Feedback::Agree)
    }

    pub fn has_pending(&self) -> bool {
        self.feedback.values().any(|f| *f == Feedback::Pending)
    }

    pub fn all_agree(&self) -> bool {
        !self.members.is_empty() && self.feedback.values().all(|f| *f == Feedback::Agree)
    }

    // Mutators

    /// Append a member with pending feedback
    pub fn add_member(&mut self, id: UserId) {
        if !self.is_member(&id) {
            self.feedback.insert(id.clone(), Feedback::Pending);
            self.members.push(id);
        }
    }

    /// Remove a member and its feedback entry. Returns false if absent.
    pub fn remove_member(&mut self, id: &UserId) -> bool {
        if self.feedback.remove(id).is_none() {
            return false;
        }
        self.members.retain(|m| m != id);
        true
    }

    /// Overwrite a member's feedback (last write wins).
    /// Returns false when the user is not a member.
    pub fn set_feedback(&mut self, id: &UserId, value: Feedback) -> bool {
        match self.feedback.get_mut(id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Promote to Confirmed
    pub fn confirm(&mut self) {
        self.status = TeamStatus::Confirmed;
    }

    /// Push the expiry deadline out to `now + ttl`
    pub fn extend_deadline(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.expires_at = now + ttl;
    }

    fn members_with(&self, value: Feedback) -> Vec<UserId> {
        self.members
            .iter()
            .filter(|id| self.feedback.get(*id) == Some(&value))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn team(names: &[&str]) -> Team {
        Team::new(
            names.iter().map(|n| uid(n)).collect(),
            Utc::now(),
            Duration::hours(24),
        )
    }

    #[test]
    fn test_team_id_generated_unique() {
        let a = TeamId::generate();
        let b = TeamId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("team-"));
    }

    #[test]
    fn test_new_team_all_pending() {
        let team = team(&["a", "b", "c"]);
        assert_eq!(team.members().len(), 3);
        assert_eq!(team.feedback().len(), 3);
        assert!(team.has_pending());
        assert!(team.status().is_forming());
        assert_eq!(team.pending_members(), vec![uid("a"), uid("b"), uid("c")]);
    }

    #[test]
    fn test_feedback_keys_track_members() {
        let mut team = team(&["a", "b"]);

        team.add_member(uid("c"));
        assert_eq!(team.members().len(), 3);
        assert_eq!(team.feedback().len(), 3);

        assert!(team.remove_member(&uid("a")));
        assert_eq!(team.members(), &[uid("b"), uid("c")]);
        assert_eq!(team.feedback().len(), 2);
        assert!(!team.feedback().contains_key(&uid("a")));

        assert!(!team.remove_member(&uid("a")));
    }

    #[test]
    fn test_add_member_idempotent() {
        let mut team = team(&["a"]);
        team.add_member(uid("a"));
        assert_eq!(team.members().len(), 1);
    }

    #[test]
    fn test_set_feedback_overwrites() {
        let mut team = team(&["a", "b"]);

        assert!(team.set_feedback(&uid("a"), Feedback::Disagree));
        assert!(team.set_feedback(&uid("a"), Feedback::Agree));
        assert_eq!(team.feedback()[&uid("a")], Feedback::Agree);

        assert!(!team.set_feedback(&uid("z"), Feedback::Agree));
    }

    #[test]
    fn test_consensus_queries() {
        let mut team = team(&["a", "b", "c"]);
        team.set_feedback(&uid("a"), Feedback::Agree);
        team.set_feedback(&uid("b"), Feedback::Disagree);

        assert!(team.has_pending());
        assert!(!team.all_agree());
        assert_eq!(team.disagreeing_members(), vec![uid("b")]);
        assert_eq!(team.agreeing_members(), vec![uid("a")]);

        team.set_feedback(&uid("b"), Feedback::Agree);
        team.set_feedback(&uid("c"), Feedback::Agree);
        assert!(team.all_agree());
    }

    #[test]
    fn test_empty_team_never_all_agree() {
        let mut team = team(&["a"]);
        team.remove_member(&uid("a"));
        assert!(!team.all_agree());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let team = Team::new(vec![uid("a")], now, Duration::hours(1));

        assert!(!team.is_expired(now));
        assert!(!team.is_expired(now + Duration::hours(1)));
        assert!(team.is_expired(now + Duration::hours(2)));
    }

    #[test]
    fn test_extend_deadline() {
        let now = Utc::now();
        let mut team = Team::new(vec![uid("a")], now, Duration::hours(1));

        let later = now + Duration::hours(5);
        team.extend_deadline(later, Duration::hours(1));
        assert!(!team.is_expired(later));
        assert_eq!(team.expires_at(), later + Duration::hours(1));
    }

    #[test]
    fn test_parse_submission() {
        assert_eq!(Feedback::parse_submission("agree"), Some(Feedback::Agree));
        assert_eq!(
            Feedback::parse_submission("disagree"),
            Some(Feedback::Disagree)
        );
        assert_eq!(Feedback::parse_submission("pending"), None);
        assert_eq!(Feedback::parse_submission("AGREE"), None);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TeamStatus::Forming).unwrap(),
            "\"forming\""
        );
        assert_eq!(
            serde_json::to_string(&Feedback::Disagree).unwrap(),
            "\"disagree\""
        );
    }
}
