//! Matching vocabulary shared between the engine and the API surface

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::room::RoomHandles;
use crate::domain::team::{Feedback, Team, TeamId, TeamStatus};
use crate::domain::user::{User, UserId};

/// Outcome of a feedback evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// At least one member has not responded yet
    Waiting,
    /// Disagreeing members were removed and the team was refilled
    Reformed,
    /// Unanimous agreement; the team is final
    Confirmed,
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Reformed => write!(f, "reformed"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Manual resolution action for a stuck team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    /// Return disagreeing members to the pool, keep the rest in place
    Requeue,
    /// Spin a fresh team from the currently-agreeing members
    Rematch,
}

impl ResolveAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "requeue" => Some(Self::Requeue),
            "rematch" => Some(Self::Rematch),
            _ => None,
        }
    }
}

/// Read-only view of a team with member records joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub id: TeamId,
    pub status: TeamStatus,
    pub members: Vec<User>,
    pub feedback: HashMap<UserId, Feedback>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TeamSnapshot {
    /// Build a snapshot by joining member records from the canonical store
    pub fn from_team(team: &Team, users: &HashMap<UserId, User>) -> Self {
        let members = team
            .members()
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect();

        Self {
            id: team.id().clone(),
            status: team.status(),
            members,
            feedback: team.feedback().clone(),
            created_at: team.created_at(),
            expires_at: team.expires_at(),
        }
    }
}

/// A confirmed team together with its provisioned rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedTeamSnapshot {
    #[serde(flatten)]
    pub team: TeamSnapshot,
    pub rooms: RoomHandles,
}

/// Full read-only view of the engine state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub pool: Vec<User>,
    pub active_teams: Vec<TeamSnapshot>,
    pub confirmed_teams: Vec<ConfirmedTeamSnapshot>,
}

/// Result of a successful feedback submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub team: TeamSnapshot,
    pub disposition: Disposition,
    /// Present only when the submission confirmed the team
    pub rooms: Option<RoomHandles>,
}

/// Result of a manual resolution
#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    /// Disagreeing members were returned to the pool
    Requeued { pool: Vec<User> },
    /// A fresh team was created from the agreeing members
    Rematched { team: TeamSnapshot },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_serialization() {
        assert_eq!(
            serde_json::to_string(&Disposition::Waiting).unwrap(),
            "\"waiting\""
        );
        assert_eq!(
            serde_json::to_string(&Disposition::Reformed).unwrap(),
            "\"reformed\""
        );
        assert_eq!(
            serde_json::to_string(&Disposition::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }

    #[test]
    fn test_resolve_action_parse() {
        assert_eq!(ResolveAction::parse("requeue"), Some(ResolveAction::Requeue));
        assert_eq!(ResolveAction::parse("rematch"), Some(ResolveAction::Rematch));
        assert_eq!(ResolveAction::parse("restart"), None);
        assert_eq!(ResolveAction::parse(""), None);
    }

    #[test]
    fn test_snapshot_joins_known_members() {
        use chrono::Duration;

        let a = UserId::new("a").unwrap();
        let b = UserId::new("b").unwrap();
        let team = Team::new(vec![a.clone(), b.clone()], Utc::now(), Duration::hours(1));

        // Only `a` exists in the store; the join skips unknown ids.
        let mut users = HashMap::new();
        users.insert(a.clone(), User::new(a.clone(), Default::default()));

        let snapshot = TeamSnapshot::from_team(&team, &users);
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.feedback.len(), 2);
        assert_eq!(snapshot.id, *team.id());
    }
}
