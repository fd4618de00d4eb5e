use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// A write route was hit without a bearer token
    #[error("No authorization token provided")]
    TokenMissing,

    /// A bearer token was presented but failed verification (expired,
    /// tampered, or signed with a different key)
    #[error("Session token rejected")]
    TokenInvalid,

    /// Login attempt for a username that does not exist
    #[error("No user named {username:?}")]
    CredentialNotFound { username: String },

    /// Login attempt with a password that does not match the stored hash
    #[error("Password mismatch")]
    CredentialInvalid,

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::TokenMissing => StatusCode::FORBIDDEN,
            Error::TokenInvalid => StatusCode::UNAUTHORIZED,
            Error::CredentialNotFound { .. } => StatusCode::NOT_FOUND,
            Error::CredentialInvalid => StatusCode::UNAUTHORIZED,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::TokenMissing => "No token provided".to_string(),
            Error::TokenInvalid => "Unauthorized".to_string(),
            Error::CredentialNotFound { .. } => "User not found".to_string(),
            Error::CredentialInvalid => "Invalid password".to_string(),
            Error::NotFound { resource, .. } => format!("{resource} not found"),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { .. } => "Resource already exists".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::TokenMissing | Error::TokenInvalid | Error::CredentialNotFound { .. } | Error::CredentialInvalid => {
                tracing::info!("Authentication error: {}", self);
            }
            Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = serde_json::json!({ "message": self.user_message() });
        (status, axum::response::Json(body)).into_response()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
