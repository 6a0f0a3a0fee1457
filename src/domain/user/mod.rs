//! User domain types

mod entity;
mod validation;

pub use entity::{User, UserId};
pub use validation::{validate_user_id, UserValidationError, MAX_USER_ID_LENGTH};
