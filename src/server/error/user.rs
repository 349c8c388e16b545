use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User ID {0:?} not found")]
    NotFound(i32),
    #[error("A user with that username already exists")]
    UsernameTaken,
    #[error("A user with that email already exists")]
    EmailTaken,
    #[error("A user with that phone number already exists")]
    PhoneNumberTaken,
    #[error("Phone number must be in E.164 format, e.g. +15555550100")]
    InvalidPhoneNumber,
    #[error("University ID {0:?} does not exist")]
    UniversityNotFound(i32),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UsernameTaken | Self::EmailTaken | Self::PhoneNumberTaken => StatusCode::CONFLICT,
            Self::InvalidPhoneNumber | Self::UniversityNotFound(_) | Self::InvalidField { .. } => {
                StatusCode::BAD_REQUEST
            }
        };

        let message = match self {
            Self::NotFound(_) => "User not found".to_string(),
            err => err.to_string(),
        };

        error_response(status, message)
    }
}
