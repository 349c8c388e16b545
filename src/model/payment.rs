use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentIntentDto {
    #[serde(rename = "bookID")]
    pub book_id: i32,
    /// Free-form meetup location recorded on the payment
    #[serde(default)]
    pub location: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentDto {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Returned when the payment processor rejects a request
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentFailedDto {
    /// Always `"failed"`
    pub status: String,
    /// The processor's error body
    #[schema(value_type = Object)]
    pub detail: serde_json::Value,
}
