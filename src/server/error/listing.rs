use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::ListingStatus;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Book listing ID {0:?} not found")]
    NotFound(i32),
    #[error("User ID {user_id:?} does not own book listing ID {listing_id:?}")]
    NotOwner { user_id: i32, listing_id: i32 },
    #[error("No listings found for owner ID {0:?}")]
    OwnerHasNoListings(i32),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Unknown ordering {0:?}")]
    InvalidOrdering(String),
    #[error("Cannot change listing status from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: ListingStatus,
        to: ListingStatus,
    },
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Book listing not found"),
            Self::NotOwner { .. } => error_response(
                StatusCode::FORBIDDEN,
                "You do not have permission to modify this listing",
            ),
            Self::OwnerHasNoListings(_) => {
                error_response(StatusCode::NOT_FOUND, "No listings found for this owner.")
            }
            Self::InvalidField { .. } | Self::InvalidOrdering(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::InvalidStatusTransition { .. } => {
                error_response(StatusCode::CONFLICT, self.to_string())
            }
        }
    }
}
