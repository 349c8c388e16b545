use std::sync::Arc;

use providers::{VerificationProvider, VerificationStatus};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{verification::VerificationError, Error},
    model::db::UserModel,
    service::retry::RetryContext,
};

/// Phone number verification through one-time SMS codes
pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
    provider: Arc<dyn VerificationProvider>,
}

impl<'a> VerificationService<'a> {
    pub fn new(db: &'a DatabaseConnection, provider: Arc<dyn VerificationProvider>) -> Self {
        Self { db, provider }
    }

    /// Send a verification code to the user's phone number
    pub async fn send_code(&self, user: &UserModel) -> Result<(), Error> {
        let phone_number = user
            .phone_number
            .clone()
            .ok_or(VerificationError::MissingPhoneNumber)?;

        let mut ctx: RetryContext<()> = RetryContext::new();
        let provider = self.provider.clone();

        ctx.execute_with_retry("send verification code", |_| {
            let provider = provider.clone();
            let phone_number = phone_number.clone();

            Box::pin(async move { Ok(provider.send_verification(&phone_number).await?) })
        })
        .await?;

        tracing::debug!(user_id = %user.id, "Sent phone verification code");

        Ok(())
    }

    /// Check a code sent to the user's phone number and mark the user verified on success
    ///
    /// Provider failures count as a wrong code.
    ///
    /// # Returns
    /// - `Ok(())` - The user is now verified
    /// - `Err(Error::VerificationError(VerificationError::CodeRejected))` - The code was not
    ///   approved
    pub async fn check_code(&self, user: &UserModel, code: u32) -> Result<(), Error> {
        let phone_number = user
            .phone_number
            .as_deref()
            .ok_or(VerificationError::MissingPhoneNumber)?;

        let status = match self
            .provider
            .check_verification(phone_number, &code.to_string())
            .await
        {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    "Failed to check phone verification code: {}",
                    e
                );

                VerificationStatus::Denied
            }
        };

        if status != VerificationStatus::Approved {
            return Err(VerificationError::CodeRejected.into());
        }

        UserRepository::new(self.db).set_verified(user.id).await?;

        tracing::info!(user_id = %user.id, "Verified user phone number");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bookmeet_test_utils::prelude::*;
    use providers::VerificationProvider;

    use crate::server::{
        data::user::UserRepository,
        error::{verification::VerificationError, Error},
        service::verification::VerificationService,
    };

    fn provider(test: &TestSetup) -> Arc<dyn VerificationProvider> {
        Arc::new(test.state.verification_provider.clone())
    }

    /// Expect a code to be sent to a user with a phone number
    #[tokio::test]
    async fn sends_code() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let user = test.user().insert_user_with_phone("alice").await?;
        let endpoint = test.verification().create_send_endpoint(1).await;

        let result = VerificationService::new(&test.state.db, provider(&test))
            .send_code(&user)
            .await;

        assert!(result.is_ok());
        endpoint.assert_async().await;

        Ok(())
    }

    /// Expect no provider request for a user without a phone number
    #[tokio::test]
    async fn send_requires_phone_number() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let user = test.user().insert_user("alice").await?;
        let endpoint = test.verification().create_send_endpoint(0).await;

        let result = VerificationService::new(&test.state.db, provider(&test))
            .send_code(&user)
            .await;

        assert!(matches!(
            result,
            Err(Error::VerificationError(VerificationError::MissingPhoneNumber))
        ));
        endpoint.assert_async().await;

        Ok(())
    }

    /// Expect an approved code to verify the user
    #[tokio::test]
    async fn verifies_approved_code() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let user = test.user().insert_user_with_phone("alice").await?;
        let endpoint = test.verification().create_check_endpoint("approved", 1).await;

        let result = VerificationService::new(&test.state.db, provider(&test))
            .check_code(&user, 123456)
            .await;

        assert!(result.is_ok());
        let stored = UserRepository::new(&test.state.db).get(user.id).await?.unwrap();
        assert!(stored.is_verified);
        endpoint.assert_async().await;

        Ok(())
    }

    /// Expect a wrong code to leave the user unverified
    #[tokio::test]
    async fn rejects_wrong_code() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let user = test.user().insert_user_with_phone("alice").await?;
        let endpoint = test.verification().create_check_endpoint("pending", 1).await;

        let result = VerificationService::new(&test.state.db, provider(&test))
            .check_code(&user, 111111)
            .await;

        assert!(matches!(
            result,
            Err(Error::VerificationError(VerificationError::CodeRejected))
        ));
        let stored = UserRepository::new(&test.state.db).get(user.id).await?.unwrap();
        assert!(!stored.is_verified);
        endpoint.assert_async().await;

        Ok(())
    }

    /// Expect a provider failure to be treated as a wrong code
    #[tokio::test]
    async fn provider_failure_is_rejection() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let user = test.user().insert_user_with_phone("alice").await?;
        let endpoint = test.verification().create_check_error_endpoint(404, 1).await;

        let result = VerificationService::new(&test.state.db, provider(&test))
            .check_code(&user, 123456)
            .await;

        assert!(matches!(
            result,
            Err(Error::VerificationError(VerificationError::CodeRejected))
        ));
        let stored = UserRepository::new(&test.state.db).get(user.id).await?.unwrap();
        assert!(!stored.is_verified);
        endpoint.assert_async().await;

        Ok(())
    }
}
