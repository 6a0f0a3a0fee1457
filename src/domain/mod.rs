//! Domain layer - Core business logic and entities

pub mod error;
pub mod matching;
pub mod room;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use matching::{
    ConfirmedTeamSnapshot, Disposition, ResolveAction, ResolveOutcome, StateSnapshot,
    SubmissionOutcome, TeamSnapshot,
};
pub use room::{RoomHandle, RoomHandles, RoomProvisioner};
pub use team::{Feedback, Team, TeamId, TeamStatus};
pub use user::{validate_user_id, User, UserId, UserValidationError};
