use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, WebhookError};

/// Customer to create at the payment processor
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub email: String,
    pub name: String,
    /// Replaying a request with the same key returns the customer created by the first one
    pub idempotency_key: String,
}

#[derive(Debug, Clone)]
pub struct NewPaymentIntent {
    /// Amount in the currency's minor unit
    pub amount: i64,
    pub currency: String,
    pub customer: String,
    pub metadata: Vec<(String, String)>,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    pub object: serde_json::Value,
}

/// The fields of a charge object needed to record a connection fee
#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    pub id: String,
    pub customer: Option<String>,
    pub amount: i64,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl WebhookEvent {
    pub const CHARGE_SUCCEEDED: &'static str = "charge.succeeded";

    pub fn is_charge_succeeded(&self) -> bool {
        self.event_type == Self::CHARGE_SUCCEEDED
    }

    /// Interpret the event's data object as a charge.
    pub fn charge(&self) -> Result<Charge, serde_json::Error> {
        Charge::deserialize(&self.data.object)
    }
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a customer and return its provider id.
    async fn create_customer(&self, customer: NewCustomer) -> Result<String, ProviderError>;

    async fn create_payment_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, ProviderError>;

    /// Verify the signature of a webhook delivery and parse its event.
    fn construct_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, WebhookError>;
}
