//! HTTP API layer

pub mod health;
pub mod router;
pub mod state;
pub mod types;
pub mod v1;
