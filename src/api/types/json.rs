//! Custom JSON extractor that returns rejections in the error envelope

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiErrorResponse;

/// Wrapper around `axum::Json` that converts body/deserialization failures
/// into the `{ success: false, error_code, message }` envelope instead of
/// axum's plain-text rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection carrying the envelope
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            success: false,
            error_code: "invalid_request_body".to_string(),
            message: self.message,
        };

        (self.status, AxumJson(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(JsonRejection {
                status: rejection.status(),
                message: rejection_message(&rejection),
            }),
        }
    }
}

fn rejection_message(rejection: &axum::extract::rejection::JsonRejection) -> String {
    use axum::extract::rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
