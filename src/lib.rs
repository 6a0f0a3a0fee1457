//! TeamUp API
//!
//! A team-formation service: it pools waiting participants, batches them
//! into fixed-size teams, collects per-member consensus feedback, and
//! reshapes teams when consensus fails or members miss the response
//! deadline. Confirmed teams receive opaque chat/project room handles.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::matching::MatchingEngine;
use infrastructure::room::LocalRoomProvisioner;

/// Create the application state with the engine wired to the local
/// room provisioner
pub fn create_app_state(config: &AppConfig) -> AppState {
    let engine = MatchingEngine::new(
        config.matching.engine_config(),
        Arc::new(LocalRoomProvisioner::new()),
    );

    AppState::new(Arc::new(engine))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_app_state_uses_config() {
        let mut config = AppConfig::default();
        config.matching.team_size = 6;

        let state = create_app_state(&config);
        assert_eq!(state.engine.config().team_size, 6);
    }
}
