use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Internal server error")]
    Internal,
}

impl TaError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaError::InvalidCredentials | TaError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            TaError::Validation(_) => StatusCode::BAD_REQUEST,
            TaError::Crypto(_) | TaError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for TaError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            // Unknown username and wrong password both surface here with
            // the same code and message (no username enumeration).
            TaError::InvalidCredentials => {
                ("AUTHENTICATION_FAILED", "Invalid credentials".to_string())
            }
            TaError::InvalidToken(reason) => ("INVALID_TOKEN", reason.clone()),
            TaError::Validation(reason) => ("VALIDATION_ERROR", reason.clone()),
            TaError::Crypto(_) => (
                "CRYPTO_ERROR",
                "An internal cryptographic error occurred".to_string(),
            ),
            TaError::Internal => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (self.status_code(), Json(body)).into_response()
    }
}
