//! HTTP clients for the external services the marketplace depends on.
//!
//! Payments and phone verification are reached through two narrow traits,
//! [`PaymentProvider`] and [`VerificationProvider`], so the server holds them as
//! `Arc<dyn ...>` and tests can point the concrete clients at a mock server.

pub mod error;
mod http;
pub mod payment;
pub mod stripe;
pub mod twilio;
pub mod verification;
pub mod webhook;

pub use error::{ProviderError, WebhookError};
pub use payment::{
    Charge, NewCustomer, NewPaymentIntent, PaymentIntent, PaymentProvider, WebhookEvent,
};
pub use stripe::{StripeClient, StripeConfig};
pub use twilio::{TwilioConfig, TwilioVerifyClient};
pub use verification::{VerificationProvider, VerificationStatus};
