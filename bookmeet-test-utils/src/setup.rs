use std::{sync::Arc, time::Duration};

use mockito::{Mock, Server, ServerGuard};
use providers::{StripeClient, StripeConfig, TwilioConfig, TwilioVerifyClient};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::{
    constant::{
        TEST_STRIPE_SECRET_KEY, TEST_STRIPE_WEBHOOK_SECRET, TEST_TWILIO_ACCOUNT_SID,
        TEST_TWILIO_AUTH_TOKEN, TEST_TWILIO_VERIFY_SERVICE_SID,
    },
    error::TestError,
};

pub struct TestAppState {
    pub db: DatabaseConnection,
    pub payment_provider: StripeClient,
    pub verification_provider: TwilioVerifyClient,
}

pub struct TestSetup {
    pub server: ServerGuard,
    pub state: TestAppState,
    pub session: Session,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    /// Convert TestAppState into any type that can be constructed from its fields.
    /// This allows conversion to AppState without creating a circular dependency.
    ///
    /// # Example
    /// ```ignore
    /// let app_state: AppState = test.state();
    /// ```
    pub fn state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, StripeClient, TwilioVerifyClient)>,
    {
        T::from((
            self.state.db.clone(),
            self.state.payment_provider.clone(),
            self.state.verification_provider.clone(),
        ))
    }
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;
        let mock_server_url = mock_server.url();

        let payment_provider = StripeClient::new(StripeConfig {
            api_url: mock_server_url.clone(),
            secret_key: TEST_STRIPE_SECRET_KEY.to_string(),
            webhook_secret: TEST_STRIPE_WEBHOOK_SECRET.to_string(),
            timeout: Duration::from_secs(5),
        })?;

        let verification_provider = TwilioVerifyClient::new(TwilioConfig {
            api_url: mock_server_url,
            account_sid: TEST_TWILIO_ACCOUNT_SID.to_string(),
            auth_token: TEST_TWILIO_AUTH_TOKEN.to_string(),
            verify_service_sid: TEST_TWILIO_VERIFY_SERVICE_SID.to_string(),
            timeout: Duration::from_secs(5),
        })?;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup {
            server: mock_server,
            state: TestAppState {
                db,
                payment_provider,
                verification_provider,
            },
            session,
            mocks: Vec::new(),
        })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.state.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Create every table a marketplace flow touches: universities, users, listings, meetups,
/// completed listings, the fee ledger and the webhook audit log.
#[macro_export]
macro_rules! test_setup_with_marketplace_tables {
    () => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                schema.create_table_from_entity(entity::prelude::University),
                schema.create_table_from_entity(entity::prelude::UniversityDomain),
                schema.create_table_from_entity(entity::prelude::BookmeetUser),
                schema.create_table_from_entity(entity::prelude::BookListing),
                schema.create_table_from_entity(entity::prelude::CompletedListing),
                schema.create_table_from_entity(entity::prelude::MeetupRequest),
                schema.create_table_from_entity(entity::prelude::ConnectionFeePaid),
                schema.create_table_from_entity(entity::prelude::PaymentWebhookEvent),
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
