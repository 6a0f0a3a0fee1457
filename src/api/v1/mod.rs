//! v1 API endpoints

pub mod pool;
pub mod teams;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/pool", post(pool::enqueue).get(pool::get_pool))
        .route("/users/{user_id}", get(pool::get_user))
        .route("/teams/assemble", post(teams::assemble))
        .route("/teams", get(teams::list_teams))
        .route("/teams/confirmed", get(teams::list_confirmed))
        .route("/teams/{team_id}/feedback", post(teams::submit_feedback))
        .route("/teams/{team_id}/resolve", post(teams::resolve))
        .route("/status", get(teams::status))
}
