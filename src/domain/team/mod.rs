//! Team domain types

mod entity;

pub use entity::{Feedback, Team, TeamId, TeamStatus};
