use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User '{id}' not found")]
    UserNotFound { id: String },

    #[error("Team '{id}' not found")]
    TeamNotFound { id: String },

    #[error("User '{user_id}' is not a member of team '{team_id}'")]
    MemberNotFound { team_id: String, user_id: String },

    #[error("User '{id}' is already a member of forming team '{team_id}'")]
    AlreadyAssigned { id: String, team_id: String },

    #[error("Invalid feedback value: '{value}'")]
    InvalidFeedback { value: String },

    #[error("Unknown resolve action: '{action}'")]
    UnknownResolveAction { action: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn team_not_found(id: impl Into<String>) -> Self {
        Self::TeamNotFound { id: id.into() }
    }

    pub fn member_not_found(team_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::MemberNotFound {
            team_id: team_id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn already_assigned(id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self::AlreadyAssigned {
            id: id.into(),
            team_id: team_id.into(),
        }
    }

    pub fn invalid_feedback(value: impl Into<String>) -> Self {
        Self::InvalidFeedback {
            value: value.into(),
        }
    }

    pub fn unknown_resolve_action(action: impl Into<String>) -> Self {
        Self::UnknownResolveAction {
            action: action.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable error code used in wire responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound { .. } => "user_not_found",
            Self::TeamNotFound { .. } => "team_not_found",
            Self::MemberNotFound { .. } => "member_not_found",
            Self::AlreadyAssigned { .. } => "already_assigned",
            Self::InvalidFeedback { .. } => "invalid_feedback",
            Self::UnknownResolveAction { .. } => "unknown_resolve_action",
            Self::Validation { .. } => "validation_error",
            Self::Internal { .. } => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_not_found_error() {
        let error = DomainError::team_not_found("team-42");
        assert_eq!(error.to_string(), "Team 'team-42' not found");
        assert_eq!(error.code(), "team_not_found");
    }

    #[test]
    fn test_already_assigned_error() {
        let error = DomainError::already_assigned("alice", "team-1");
        assert_eq!(
            error.to_string(),
            "User 'alice' is already a member of forming team 'team-1'"
        );
        assert_eq!(error.code(), "already_assigned");
    }

    #[test]
    fn test_member_not_found_error() {
        let error = DomainError::member_not_found("team-1", "bob");
        assert_eq!(
            error.to_string(),
            "User 'bob' is not a member of team 'team-1'"
        );
        assert_eq!(error.code(), "member_not_found");
    }

    #[test]
    fn test_invalid_feedback_error() {
        let error = DomainError::invalid_feedback("maybe");
        assert_eq!(error.to_string(), "Invalid feedback value: 'maybe'");
        assert_eq!(error.code(), "invalid_feedback");
    }
}
