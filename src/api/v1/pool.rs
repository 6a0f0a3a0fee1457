//! Waiting pool endpoints

use axum::extract::{Path, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, EnqueueRequest, Json, PoolResponse};
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

/// POST /v1/pool - add a user to the waiting pool (idempotent by id)
pub async fn enqueue(
    State(state): State<AppState>,
    Json(request): Json<EnqueueRequest>,
) -> Result<Json<PoolResponse>, ApiError> {
    let id = parse_user_id(&request.id)?;
    let pool = state.engine.enqueue(id, request.profile)?;

    Ok(Json(PoolResponse { pool }))
}

/// GET /v1/pool - current waiting pool snapshot
pub async fn get_pool(State(state): State<AppState>) -> Result<Json<PoolResponse>, ApiError> {
    let pool = state.engine.pool_snapshot()?;
    Ok(Json(PoolResponse { pool }))
}

/// GET /v1/users/{user_id} - canonical user record (profile + exclusions)
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&user_id)?;
    let user = state.engine.user(&id)?;
    Ok(Json(user))
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw)
        .map_err(|e| DomainError::validation(e.to_string()))
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_user_id_rejects_invalid() {
        let err = parse_user_id("").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error_code, "validation_error");
    }

    #[test]
    fn test_parse_user_id_accepts_valid() {
        assert_eq!(parse_user_id("alice").unwrap().as_str(), "alice");
    }
}
