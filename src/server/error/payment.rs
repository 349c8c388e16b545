use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::payment::PaymentFailedDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum PaymentError {
    /// The payment processor refused the request, its error body is returned to the client
    #[error("Payment provider rejected request with status {status}")]
    ProviderRejected {
        status: u16,
        body: serde_json::Value,
    },
    #[error("Charge object could not be parsed: {0}")]
    MalformedCharge(String),
    #[error("Charge {0:?} has no customer")]
    ChargeWithoutCustomer(String),
    #[error("Charge {charge_id:?} has missing or invalid book_id metadata {book_id:?}")]
    InvalidBookId {
        charge_id: String,
        book_id: Option<String>,
    },
    #[error("No user found with payment customer {0:?}")]
    UnknownCustomer(String),
    #[error("No book listing found with ID {0:?}")]
    UnknownListing(i32),
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        match self {
            Self::ProviderRejected { status, body } => {
                tracing::debug!(status = %status, "Payment provider rejected request");

                (
                    StatusCode::BAD_REQUEST,
                    Json(PaymentFailedDto {
                        status: "failed".to_string(),
                        detail: body,
                    }),
                )
                    .into_response()
            }
            // Reconciliation failures never reach a client, they are recorded on the webhook event
            err => InternalServerError(err).into_response(),
        }
    }
}
