//! Placeholder provider credentials used by every test client.
//!
//! None of these are real credentials, the clients they configure only ever talk to the
//! mockito server created by [`crate::TestSetup`].

pub static TEST_STRIPE_SECRET_KEY: &str = "sk_test_bookmeet";

/// Secret used both to sign test webhook payloads and to verify them
pub static TEST_STRIPE_WEBHOOK_SECRET: &str = "whsec_bookmeet";

pub static TEST_TWILIO_ACCOUNT_SID: &str = "AC00000000000000000000000000000000";

pub static TEST_TWILIO_AUTH_TOKEN: &str = "twilio_auth_token";

pub static TEST_TWILIO_VERIFY_SERVICE_SID: &str = "VA00000000000000000000000000000000";

/// Default E.164 phone number given to users that need one
pub static TEST_PHONE_NUMBER: &str = "+15555550100";
