//! Error types for the marketplace server.
//!
//! Each domain has its own `thiserror` enum implementing `IntoResponse`, and the top level
//! [`Error`] aggregates them together with library errors so handlers can use `?` freely.
//! Anything without a dedicated mapping becomes a logged, generic 500 response.

pub mod auth;
pub mod config;
pub mod listing;
pub mod meetup;
pub mod payment;
pub mod retry;
pub mod user;
pub mod verification;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, listing::ListingError, meetup::MeetupError,
        payment::PaymentError, user::UserError, verification::VerificationError,
    },
};

/// Main error type for the server application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (no session, bad credentials).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Account error (registration and profile validation, conflicts).
    #[error(transparent)]
    UserError(#[from] UserError),
    #[error(transparent)]
    ListingError(#[from] ListingError),
    #[error(transparent)]
    MeetupError(#[from] MeetupError),
    #[error(transparent)]
    PaymentError(#[from] PaymentError),
    #[error(transparent)]
    VerificationError(#[from] VerificationError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in the server's code.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Payment or verification provider error (transport, unexpected response).
    #[error(transparent)]
    ProviderError(#[from] providers::ProviderError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::UserError(err) => err.into_response(),
            Self::ListingError(err) => err.into_response(),
            Self::MeetupError(err) => err.into_response(),
            Self::PaymentError(err) => err.into_response(),
            Self::VerificationError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Build a JSON error response with the provided status and message
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged while the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
