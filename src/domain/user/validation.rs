//! User ID validation rules

use thiserror::Error;

/// Maximum length of a user ID
pub const MAX_USER_ID_LENGTH: usize = 64;

/// Validation errors for user data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID cannot exceed {MAX_USER_ID_LENGTH} characters")]
    IdTooLong,

    #[error("User ID cannot contain whitespace")]
    IdContainsWhitespace,
}

/// Validate a user ID: non-empty, bounded length, no whitespace
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong);
    }

    if id.chars().any(char::is_whitespace) {
        return Err(UserValidationError::IdContainsWhitespace);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_id() {
        assert!(validate_user_id("alice").is_ok());
        assert!(validate_user_id("user-123").is_ok());
        assert!(validate_user_id("u").is_ok());
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_user_id_too_long() {
        let id = "a".repeat(MAX_USER_ID_LENGTH + 1);
        assert_eq!(validate_user_id(&id), Err(UserValidationError::IdTooLong));
    }

    #[test]
    fn test_user_id_with_whitespace() {
        assert_eq!(
            validate_user_id("alice smith"),
            Err(UserValidationError::IdContainsWhitespace)
        );
        assert_eq!(
            validate_user_id("alice\t"),
            Err(UserValidationError::IdContainsWhitespace)
        );
    }
}
