//! Application state shared across handlers

use std::sync::Arc;

use crate::infrastructure::matching::MatchingEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine>,
}

impl AppState {
    pub fn new(engine: Arc<MatchingEngine>) -> Self {
        Self { engine }
    }
}
