use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::MeetupStatus;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum MeetupError {
    #[error("bookId is required")]
    MissingBookId,
    #[error("meetupRequestId is required")]
    MissingMeetupRequestId,
    #[error("Book listing ID {0:?} does not exist")]
    ListingNotFound(i32),
    #[error("Meetup request ID {0:?} does not exist")]
    NotFound(i32),
    #[error("User ID {user_id:?} does not own the listing of meetup request ID {meetup_request_id:?}")]
    NotListingOwner {
        user_id: i32,
        meetup_request_id: i32,
    },
    #[error("Cannot accept a meetup request that is {0:?}")]
    InvalidTransition(MeetupStatus),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl IntoResponse for MeetupError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingBookId | Self::MissingMeetupRequestId | Self::InvalidField { .. } => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::ListingNotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "BookListing does not exist")
            }
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "MeetupRequest does not exist"),
            Self::NotListingOwner { .. } => error_response(
                StatusCode::FORBIDDEN,
                "You do not have permission to accept this request",
            ),
            Self::InvalidTransition(_) => error_response(StatusCode::CONFLICT, self.to_string()),
        }
    }
}
