//! Team lifecycle endpoints

use axum::extract::{Path, State};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, AssembleResponse, ConfirmedTeamsResponse, FeedbackRequest, FeedbackResponse, Json,
    ResolveRequest, ResolveResponse, TeamsResponse,
};
use crate::domain::matching::{ResolveAction, StateSnapshot};
use crate::domain::team::{Feedback, TeamId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// POST /v1/teams/assemble - batch the waiting pool into new teams.
/// A pool smaller than the team size yields an empty list, not an error.
pub async fn assemble(
    State(state): State<AppState>,
) -> Result<Json<AssembleResponse>, ApiError> {
    let created_teams = state.engine.assemble_all()?;
    Ok(Json(AssembleResponse { created_teams }))
}

/// GET /v1/teams - active (Forming) teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<TeamsResponse>, ApiError> {
    let teams = state.engine.active_teams()?;
    Ok(Json(TeamsResponse { teams }))
}

/// GET /v1/teams/confirmed - confirmed teams with their room handles
pub async fn list_confirmed(
    State(state): State<AppState>,
) -> Result<Json<ConfirmedTeamsResponse>, ApiError> {
    let teams = state.engine.confirmed_teams()?;
    Ok(Json(ConfirmedTeamsResponse { teams }))
}

/// POST /v1/teams/{team_id}/feedback - record a member's consensus feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let user_id = UserId::new(&request.user_id)
        .map_err(|e| DomainError::validation(e.to_string()))?;
    let feedback = Feedback::parse_submission(&request.feedback)
        .ok_or_else(|| DomainError::invalid_feedback(&request.feedback))?;

    let outcome =
        state
            .engine
            .submit_feedback(&TeamId::from_raw(team_id), &user_id, feedback)?;

    Ok(Json(FeedbackResponse::from(outcome)))
}

/// POST /v1/teams/{team_id}/resolve - manual requeue or rematch
pub async fn resolve(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let action = ResolveAction::parse(&request.action)
        .ok_or_else(|| DomainError::unknown_resolve_action(&request.action))?;

    let outcome = state.engine.resolve(&TeamId::from_raw(team_id), action)?;
    Ok(Json(ResolveResponse::from(outcome)))
}

/// GET /v1/status - read-only snapshot of pool, active, and confirmed teams
pub async fn status(State(state): State<AppState>) -> Result<Json<StateSnapshot>, ApiError> {
    Ok(Json(state.engine.snapshot()?))
}
