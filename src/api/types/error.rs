//! Wire-level error envelope
//!
//! Every failure carries the proper HTTP status and a
//! `{ success: false, error_code, message }` body - one convention for all
//! error classes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always false
    pub success: bool,
    /// Stable machine-readable code
    pub error_code: String,
    pub message: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(
        status: StatusCode,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                success: false,
                error_code: error_code.into(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_code, message)
    }

    pub fn not_found(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_code, message)
    }

    pub fn conflict(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, error_code, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = err.code();
        let message = err.to_string();

        match &err {
            DomainError::UserNotFound { .. }
            | DomainError::TeamNotFound { .. }
            | DomainError::MemberNotFound { .. } => Self::not_found(code, message),
            DomainError::AlreadyAssigned { .. } => Self::conflict(code, message),
            DomainError::InvalidFeedback { .. }
            | DomainError::UnknownResolveAction { .. }
            | DomainError::Validation { .. } => Self::bad_request(code, message),
            DomainError::Internal { .. } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error_code, self.response.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("invalid_feedback", "Invalid feedback value: 'maybe'");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error_code, "invalid_feedback");
        assert!(!err.response.success);
    }

    #[test]
    fn test_not_found_mapping() {
        let err: ApiError = DomainError::team_not_found("team-1").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.response.error_code, "team_not_found");

        let err: ApiError = DomainError::member_not_found("team-1", "bob").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = DomainError::user_not_found("bob").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_mapping() {
        let err: ApiError = DomainError::already_assigned("alice", "team-1").into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.response.error_code, "already_assigned");
    }

    #[test]
    fn test_bad_request_mapping() {
        let err: ApiError = DomainError::invalid_feedback("maybe").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: ApiError = DomainError::unknown_resolve_action("restart").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error_code, "unknown_resolve_action");

        let err: ApiError = DomainError::validation("bad input").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_mapping() {
        let err: ApiError = DomainError::internal("lock poisoned").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response.error_code, "internal_error");
    }

    #[test]
    fn test_error_serialization() {
        let err: ApiError = DomainError::team_not_found("team-9").into();
        let json = serde_json::to_string(&err.response).unwrap();

        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error_code\":\"team_not_found\""));
        assert!(json.contains("team-9"));
    }
}
