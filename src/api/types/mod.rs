//! API request/response types and the error envelope

pub mod error;
pub mod json;
pub mod matching;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use matching::{
    AssembleResponse, ConfirmedTeamsResponse, EnqueueRequest, FeedbackRequest, FeedbackResponse,
    PoolResponse, ResolveRequest, ResolveResponse, TeamsResponse,
};
