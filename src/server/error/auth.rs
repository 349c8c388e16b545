use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("User ID {0:?} is inactive")]
    InactiveUser(i32),
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::InvalidCredentials | Self::InactiveUser(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            Self::PasswordHash(_) => InternalServerError(self).into_response(),
        }
    }
}
