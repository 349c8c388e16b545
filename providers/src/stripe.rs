use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::{ProviderError, WebhookError},
    http::read_json,
    payment::{NewCustomer, NewPaymentIntent, PaymentIntent, PaymentProvider, WebhookEvent},
    webhook::{verify_signature, DEFAULT_TOLERANCE_SECS},
};

pub const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";

/// Header carrying the signature of a webhook delivery
pub const SIGNATURE_HEADER: &str = "stripe-signature";

#[derive(Clone)]
pub struct StripeConfig {
    pub api_url: String,
    pub secret_key: String,
    pub webhook_secret: String,
    pub timeout: Duration,
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_url", &self.api_url)
            .field("secret_key", &"<redacted>")
            .field("webhook_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Stripe API client using form encoded requests over HTTPS
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: String,
    webhook_secret: String,
}

#[derive(Deserialize)]
struct CustomerResponse {
    id: String,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key,
            webhook_secret: config.webhook_secret,
        })
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
        idempotency_key: Option<&str>,
    ) -> Result<T, ProviderError> {
        let mut request = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.secret_key)
            .form(form);

        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request.send().await?;

        read_json(response).await
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_customer(&self, customer: NewCustomer) -> Result<String, ProviderError> {
        let form = vec![
            ("email".to_string(), customer.email),
            ("name".to_string(), customer.name),
        ];

        let response: CustomerResponse = self
            .post_form("/v1/customers", &form, Some(&customer.idempotency_key))
            .await?;

        tracing::debug!(customer_id = %response.id, "Created Stripe customer");

        Ok(response.id)
    }

    async fn create_payment_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, ProviderError> {
        let mut form = vec![
            ("amount".to_string(), intent.amount.to_string()),
            ("currency".to_string(), intent.currency),
            ("customer".to_string(), intent.customer),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
            (
                "automatic_payment_methods[allow_redirects]".to_string(),
                "never".to_string(),
            ),
        ];
        form.extend(
            intent
                .metadata
                .into_iter()
                .map(|(key, value)| (format!("metadata[{}]", key), value)),
        );

        let payment_intent: PaymentIntent = self
            .post_form(
                "/v1/payment_intents",
                &form,
                intent.idempotency_key.as_deref(),
            )
            .await?;

        tracing::debug!(payment_intent_id = %payment_intent.id, "Created Stripe payment intent");

        Ok(payment_intent)
    }

    fn construct_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        verify_signature(
            payload,
            signature_header,
            &self.webhook_secret,
            DEFAULT_TOLERANCE_SECS,
            chrono::Utc::now().timestamp(),
        )?;

        Ok(serde_json::from_slice(payload)?)
    }
}
