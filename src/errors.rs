use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::JsonResponse;

/// Typed failures surfaced by the service layer. The routing layer maps each
/// variant to a transport status via [`IntoResponse`]; none are retried.
#[derive(Debug)]
pub enum RequestError {
    DuplicateUsername,
    DuplicateEmail,
    InvalidCredentials,
    TokenExpired,
    TokenInvalid,
    Unauthorized,
    Forbidden,
    NotFound,
    /// A stored password digest could not be parsed as a PHC string.
    InvalidCredentialFormat,
    Validation(&'static str),
    ServerError,
    DatabaseError(sqlx::Error),
}

#[derive(serde::Serialize)]
pub struct ErrorDetail {
    detail: String,
}

impl ErrorDetail {
    pub fn new(detail: &str) -> ErrorDetail {
        ErrorDetail {
            detail: detail.to_string(),
        }
    }
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn to_json_response(&self) -> JsonResponse<ErrorDetail> {
        let (status_code, json) = match self {
            RequestError::DuplicateUsername => (
                StatusCode::CONFLICT,
                ErrorDetail::new("Username already exists"),
            ),
            RequestError::DuplicateEmail => (
                StatusCode::CONFLICT,
                ErrorDetail::new("Email already exists"),
            ),
            RequestError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("Incorrect username or password"),
            ),
            RequestError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, ErrorDetail::new("Token expired"))
            }
            RequestError::TokenInvalid => {
                (StatusCode::UNAUTHORIZED, ErrorDetail::new("Invalid token"))
            }
            RequestError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("Not authenticated"),
            ),
            RequestError::Forbidden => (
                StatusCode::FORBIDDEN,
                ErrorDetail::new("Admin privilege required"),
            ),
            RequestError::NotFound => (StatusCode::NOT_FOUND, ErrorDetail::new("Not Found")),
            RequestError::InvalidCredentialFormat => {
                tracing::error!("stored password digest is not a valid PHC string");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail::new("Internal Server Error"),
                )
            }
            RequestError::Validation(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorDetail::new(message))
            }
            RequestError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("Internal Server Error"),
            ),
            RequestError::DatabaseError(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail::new("Internal Server Error"),
                )
            }
        };
        (status_code, Json(json))
    }
}
