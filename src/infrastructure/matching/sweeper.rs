//! Periodic expiry sweep for stale forming teams

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::engine::MatchingEngine;

/// Periodic task that expires stale Forming teams.
///
/// Every pass goes through the engine's write lock, so sweep mutations are
/// serialized with feedback submissions and manual resolutions.
pub struct ExpirationSweeper {
    engine: Arc<MatchingEngine>,
    period: Duration,
}

impl ExpirationSweeper {
    pub fn new(engine: Arc<MatchingEngine>, period: Duration) -> Self {
        Self { engine, period }
    }

    /// Spawn the sweep loop on the current runtime
    pub fn spawn(self) -> JoinHandle<()> {
        info!(period_secs = self.period.as_secs(), "Starting expiration sweeper");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // the first tick fires immediately; skip it
            interval.tick().await;

            loop {
                interval.tick().await;

                match self.engine.sweep(Utc::now()) {
                    Ok(reshaped) if reshaped.is_empty() => {
                        debug!("Expiry sweep found no stale teams");
                    }
                    Ok(reshaped) => {
                        info!(reshaped = reshaped.len(), "Expiry sweep reshaped teams");
                    }
                    Err(e) => {
                        warn!(error = %e, "Expiry sweep failed");
                    }
                }
            }
        })
    }
}
