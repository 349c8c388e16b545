use std::sync::Arc;

use providers::{PaymentProvider, StripeClient, TwilioVerifyClient, VerificationProvider};
use sea_orm::DatabaseConnection;

/// Fixed fee charged to unlock meetup coordination on a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionFee {
    /// Amount in the currency's minor unit
    pub amount: i64,
    /// Lowercase ISO currency code
    pub currency: String,
}

impl ConnectionFee {
    pub const DEFAULT_AMOUNT: i64 = 100;
    pub const DEFAULT_CURRENCY: &'static str = "usd";
}

impl Default for ConnectionFee {
    fn default() -> Self {
        Self {
            amount: Self::DEFAULT_AMOUNT,
            currency: Self::DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub verification_provider: Arc<dyn VerificationProvider>,
    pub connection_fee: ConnectionFee,
}

impl From<(DatabaseConnection, StripeClient, TwilioVerifyClient)> for AppState {
    fn from(
        (db, payment_provider, verification_provider): (
            DatabaseConnection,
            StripeClient,
            TwilioVerifyClient,
        ),
    ) -> Self {
        Self {
            db,
            payment_provider: Arc::new(payment_provider),
            verification_provider: Arc::new(verification_provider),
            connection_fee: ConnectionFee::default(),
        }
    }
}
