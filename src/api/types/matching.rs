//! Request and response types for the matching API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::matching::{Disposition, ResolveOutcome, SubmissionOutcome, TeamSnapshot};
use crate::domain::room::RoomHandles;
use crate::domain::user::User;

/// POST /v1/pool request body
#[derive(Debug, Clone, Deserialize)]
pub struct EnqueueRequest {
    pub id: String,
    #[serde(default)]
    pub profile: Map<String, Value>,
}

/// POST /v1/teams/{team_id}/feedback request body
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    /// `agree` or `disagree`
    pub feedback: String,
}

/// POST /v1/teams/{team_id}/resolve request body
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveRequest {
    /// `requeue` or `rematch`
    pub action: String,
}

/// Waiting pool snapshot
#[derive(Debug, Clone, Serialize)]
pub struct PoolResponse {
    pub pool: Vec<User>,
}

/// Result of an assembly request; empty when the pool was too small
#[derive(Debug, Clone, Serialize)]
pub struct AssembleResponse {
    pub created_teams: Vec<TeamSnapshot>,
}

/// Result of a feedback submission
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub disposition: Disposition,
    pub team: TeamSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<RoomHandles>,
}

impl From<SubmissionOutcome> for FeedbackResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            disposition: outcome.disposition,
            team: outcome.team,
            rooms: outcome.rooms,
        }
    }
}

/// Active (Forming) teams listing
#[derive(Debug, Clone, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<TeamSnapshot>,
}

/// Confirmed teams listing, room handles included
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedTeamsResponse {
    pub teams: Vec<crate::domain::matching::ConfirmedTeamSnapshot>,
}

/// Result of a manual resolution
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResolveResponse {
    Requeued { pool: Vec<User> },
    Rematched { team: TeamSnapshot },
}

impl From<ResolveOutcome> for ResolveResponse {
    fn from(outcome: ResolveOutcome) -> Self {
        match outcome {
            ResolveOutcome::Requeued { pool } => Self::Requeued { pool },
            ResolveOutcome::Rematched { team } => Self::Rematched { team },
        }
    }
}
