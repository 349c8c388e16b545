//! Stripe mock endpoints and webhook delivery builders.

use chrono::Utc;
use entity::sea_orm_active_enums::WebhookEventStatus;
use mockito::{Matcher, Mock};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_STRIPE_WEBHOOK_SECRET, error::TestError, TestSetup};

impl TestSetup {
    pub fn payment<'a>(&'a mut self) -> PaymentFixtures<'a> {
        PaymentFixtures { setup: self }
    }
}

pub struct PaymentFixtures<'a> {
    setup: &'a mut TestSetup,
}

/// A webhook body together with its `Stripe-Signature` header
pub struct SignedWebhook {
    pub payload: Vec<u8>,
    pub signature: String,
}

impl<'a> PaymentFixtures<'a> {
    /// Create a mock endpoint for customer creation returning `customer_id`.
    ///
    /// The mock only matches requests carrying the idempotency key derived from `user_id`.
    pub async fn create_customer_endpoint(
        &mut self,
        user_id: i32,
        customer_id: &str,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("POST", "/v1/customers")
            .match_header("idempotency-key", format!("customer-{}", user_id).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({ "id": customer_id, "object": "customer" }).to_string(),
            )
            .expect(expected_requests)
            .create_async()
            .await
    }

    /// Create a mock endpoint for payment intent creation for `customer_id`
    pub async fn create_payment_intent_endpoint(
        &mut self,
        customer_id: &str,
        client_secret: &str,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("POST", "/v1/payment_intents")
            .match_body(Matcher::UrlEncoded(
                "customer".to_string(),
                customer_id.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({ "id": "pi_test", "client_secret": client_secret }).to_string(),
            )
            .expect(expected_requests)
            .create_async()
            .await
    }

    /// Create a mock endpoint answering payment intent creation with an error `status` and `body`
    pub async fn create_payment_intent_error_endpoint(
        &mut self,
        status: usize,
        body: serde_json::Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("POST", "/v1/payment_intents")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create_async()
            .await
    }

    /// Build a `charge.succeeded` event body as Stripe would deliver it
    pub fn charge_succeeded_event(
        &self,
        event_id: &str,
        charge_id: &str,
        customer_id: &str,
        book_id: &str,
    ) -> serde_json::Value {
        serde_json::json!({
            "id": event_id,
            "object": "event",
            "type": "charge.succeeded",
            "data": {
                "object": {
                    "id": charge_id,
                    "object": "charge",
                    "amount": 100,
                    "currency": "usd",
                    "customer": customer_id,
                    "metadata": {
                        "book_id": book_id,
                        "location": "Library",
                        "Category": "Connection fee"
                    }
                }
            }
        })
    }

    /// Serialize `event` and sign it with the test webhook secret at the current time
    pub fn sign(&self, event: &serde_json::Value) -> Result<SignedWebhook, TestError> {
        let payload = serde_json::to_vec(event)?;
        let signature = providers::webhook::sign_payload(
            &payload,
            TEST_STRIPE_WEBHOOK_SECRET,
            Utc::now().timestamp(),
        )
        .unwrap_or_default();

        Ok(SignedWebhook { payload, signature })
    }

    /// Insert an audit row for a `charge.succeeded` event whose reconciliation failed
    pub async fn insert_failed_webhook_event(
        &self,
        event: &serde_json::Value,
        attempts: i32,
    ) -> Result<entity::payment_webhook_event::Model, TestError> {
        Ok(entity::prelude::PaymentWebhookEvent::insert(
            entity::payment_webhook_event::ActiveModel {
                event_id: ActiveValue::Set(event["id"].as_str().map(str::to_string)),
                event_type: ActiveValue::Set("charge.succeeded".to_string()),
                status: ActiveValue::Set(WebhookEventStatus::Failed),
                payload: ActiveValue::Set(Some(event.to_string())),
                error: ActiveValue::Set(Some("No user with matching payment customer".to_string())),
                attempts: ActiveValue::Set(attempts),
                received_at: ActiveValue::Set(Utc::now().naive_utc()),
                processed_at: ActiveValue::Set(None),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.state.db)
        .await?)
    }
}
