use std::{fmt, str::FromStr, time::Duration};

use providers::{
    stripe::DEFAULT_STRIPE_API_URL, twilio::DEFAULT_TWILIO_API_URL, StripeConfig, TwilioConfig,
};

use crate::server::{error::config::ConfigError, model::app::ConnectionFee};

static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RECONCILIATION_MAX_ATTEMPTS: i32 = 5;

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    pub stripe: StripeConfig,
    pub twilio: TwilioConfig,
    pub connection_fee: ConnectionFee,
    /// Attempts after which a failed webhook reconciliation is left for operators
    pub reconciliation_max_attempts: i32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Connection URLs may embed credentials
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("valkey_url", &"<redacted>")
            .field("bind_address", &self.bind_address)
            .field("stripe", &self.stripe)
            .field("twilio", &self.twilio)
            .field("connection_fee", &self.connection_fee)
            .field(
                "reconciliation_max_attempts",
                &self.reconciliation_max_attempts,
            )
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source, used by [`Config::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| -> Result<String, ConfigError> {
            lookup(var)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };
        let optional = |var: &str, default: &str| -> String {
            lookup(var)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout = Duration::from_secs(parse_env(
            "PROVIDER_TIMEOUT_SECS",
            lookup("PROVIDER_TIMEOUT_SECS"),
            DEFAULT_PROVIDER_TIMEOUT_SECS,
        )?);

        let connection_fee = ConnectionFee {
            amount: parse_env(
                "CONNECTION_FEE_AMOUNT",
                lookup("CONNECTION_FEE_AMOUNT"),
                ConnectionFee::DEFAULT_AMOUNT,
            )?,
            currency: optional("CONNECTION_FEE_CURRENCY", ConnectionFee::DEFAULT_CURRENCY)
                .to_lowercase(),
        };
        if connection_fee.amount <= 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "CONNECTION_FEE_AMOUNT".to_string(),
                reason: "must be a positive amount in the currency's minor unit".to_string(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_address: optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            stripe: StripeConfig {
                api_url: optional("STRIPE_API_URL", DEFAULT_STRIPE_API_URL),
                secret_key: required("STRIPE_SECRET_KEY")?,
                webhook_secret: required("STRIPE_WEBHOOK_SECRET")?,
                timeout,
            },
            twilio: TwilioConfig {
                api_url: optional("TWILIO_API_URL", DEFAULT_TWILIO_API_URL),
                account_sid: required("TWILIO_ACCOUNT_SID")?,
                auth_token: required("TWILIO_AUTH_TOKEN")?,
                verify_service_sid: required("TWILIO_VERIFY_SERVICE_SID")?,
                timeout,
            },
            connection_fee,
            reconciliation_max_attempts: parse_env(
                "RECONCILIATION_MAX_ATTEMPTS",
                lookup("RECONCILIATION_MAX_ATTEMPTS"),
                DEFAULT_RECONCILIATION_MAX_ATTEMPTS,
            )?,
        })
    }
}

fn parse_env<T>(var: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value.filter(|value| !value.is_empty()) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
    }
}
