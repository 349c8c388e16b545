use async_trait::async_trait;

use crate::error::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Approved,
    Denied,
}

#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Send a one-time code to an E.164 phone number.
    async fn send_verification(&self, phone_number: &str) -> Result<(), ProviderError>;

    /// Check a code previously sent to an E.164 phone number.
    async fn check_verification(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<VerificationStatus, ProviderError>;
}
