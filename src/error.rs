use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::validate::FieldError;

/// ApiError
///
/// The application's error taxonomy. Every fallible handler returns
/// `Result<_, ApiError>`, and each variant carries exactly the information the
/// route boundary needs to produce its status code and JSON body. Nothing is
/// swallowed below this type and nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or rule-violating input. Maps to 400 with field-level detail.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Unknown entity id. Maps to 404. The payload names the entity kind.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Missing or insufficiently privileged session. Maps to 401.
    /// The payload is the client-facing message ("Not authenticated",
    /// "Unauthorized", "Invalid password", ...).
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Uniqueness violation (duplicate username on register). Maps to 400.
    #[error("{0}")]
    Conflict(String),

    /// Anything unexpected (store failure, session store failure). Maps to a
    /// generic 500 with no internal detail leaked.
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    /// Translates the domain error into the HTTP response at the route boundary.
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Validation failed", "errors": errors })),
            )
                .into_response(),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("{entity} not found") })),
            )
                .into_response(),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ApiError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ApiError::Internal => {
                tracing::error!("request failed with an internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
