use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Must be a signed in user.")]
    NotSignedIn,
    #[error("User must have a phone number.")]
    MissingPhoneNumber,
    #[error("Could not verify phone number, please try again.")]
    CodeRejected,
}

impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
