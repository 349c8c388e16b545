//! Connection fee payments.
//!
//! Payment intents are created against the payment provider for a buyer, creating the
//! provider customer on first use. Successful charges are reported back through signed
//! webhooks which are reconciled into the connection fee ledger. Every delivery is recorded
//! in the webhook audit log, and failed reconciliations are retried from the stored payload.

use std::sync::Arc;

use chrono::Duration;
use entity::sea_orm_active_enums::WebhookEventStatus;
use providers::{NewCustomer, NewPaymentIntent, PaymentProvider, ProviderError, WebhookEvent};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::payment::{CreatePaymentIntentDto, PaymentIntentDto},
    server::{
        data::{
            listing::ListingRepository,
            payment::{connection_fee::ConnectionFeeRepository, webhook_event::WebhookEventRepository},
            user::UserRepository,
        },
        error::{auth::AuthError, payment::PaymentError, Error},
        model::{
            app::ConnectionFee,
            db::{PaymentWebhookEventModel, UserModel},
        },
        service::retry::RetryContext,
    },
};

/// Event type recorded for deliveries whose body could not be verified
const UNVERIFIED_EVENT_TYPE: &str = "unknown";
const CONNECTION_FEE_CATEGORY: &str = "Connection fee";
/// Rejected deliveries within this many seconds of each other share one audit row
const REJECTED_DELIVERY_WINDOW_SECS: i64 = 60;

/// Result of handling one webhook delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A connection fee was recorded
    Processed,
    /// The event or its charge was already recorded
    Duplicate,
    /// The event type is not reconciled
    Ignored,
    /// Reconciliation failed and will be retried
    Failed(String),
    /// Signature verification or parsing failed
    Rejected(String),
}

impl WebhookOutcome {
    /// Acknowledgement message returned to the provider
    pub fn message(&self) -> &'static str {
        match self {
            Self::Processed => "Connection fee recorded.",
            Self::Duplicate => "Event already processed.",
            Self::Ignored => "Event type ignored.",
            Self::Failed(_) | Self::Rejected(_) => "Event received.",
        }
    }
}

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    provider: Arc<dyn PaymentProvider>,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { db, provider }
    }

    /// Create a payment intent charging the connection fee to `user_id`
    ///
    /// Creates the user's payment customer first if they don't have one yet. Transient
    /// provider failures are retried with exponential backoff.
    ///
    /// # Returns
    /// - `Ok(PaymentIntentDto)` - Client secret used by the client to confirm the payment
    /// - `Err(Error::PaymentError(PaymentError::ProviderRejected))` - The provider refused
    ///   the request
    pub async fn create_payment_intent(
        &self,
        user_id: i32,
        request: CreatePaymentIntentDto,
        fee: &ConnectionFee,
    ) -> Result<PaymentIntentDto, Error> {
        let user = UserRepository::new(self.db)
            .get(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        let customer = match user.stripe_id.clone() {
            Some(customer) => customer,
            None => self.create_customer(user).await.map_err(provider_rejection)?,
        };

        let intent = NewPaymentIntent {
            amount: fee.amount,
            currency: fee.currency.clone(),
            customer,
            metadata: vec![
                ("book_id".to_string(), request.book_id.to_string()),
                ("location".to_string(), request.location),
                ("Category".to_string(), CONNECTION_FEE_CATEGORY.to_string()),
            ],
            idempotency_key: Some(format!("intent-{}-{}", user_id, Uuid::new_v4())),
        };

        let mut ctx: RetryContext<()> = RetryContext::new();
        let provider = self.provider.clone();

        let payment_intent = ctx
            .execute_with_retry("create payment intent", |_| {
                let provider = provider.clone();
                let intent = intent.clone();

                Box::pin(async move { Ok(provider.create_payment_intent(intent).await?) })
            })
            .await
            .map_err(provider_rejection)?;

        tracing::debug!(
            user_id = %user_id,
            book_id = %request.book_id,
            payment_intent_id = %payment_intent.id,
            "Created connection fee payment intent"
        );

        Ok(PaymentIntentDto {
            client_secret: payment_intent.client_secret,
        })
    }

    /// Create the payment customer of `user` and store it
    ///
    /// The provider request carries an idempotency key derived from the user ID and the
    /// customer is stored only if the user still has none. If a concurrent request stored a
    /// customer first, that customer is returned instead.
    async fn create_customer(&self, user: UserModel) -> Result<String, Error> {
        let user_id = user.id;
        let customer = NewCustomer {
            email: user.email,
            name: format!("{} {}", user.first_name, user.last_name),
            idempotency_key: format!("customer-{}", user_id),
        };

        let mut ctx: RetryContext<Option<String>> = RetryContext::new();
        let provider = self.provider.clone();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("create customer for user ID {}", user_id), |cache| {
            let provider = provider.clone();
            let customer = customer.clone();
            let db = db.clone();

            Box::pin(async move {
                let customer_id = match cache.clone() {
                    Some(customer_id) => customer_id,
                    None => {
                        let customer_id = provider.create_customer(customer).await?;
                        *cache = Some(customer_id.clone());
                        customer_id
                    }
                };

                let user_repo = UserRepository::new(&db);
                if user_repo
                    .set_stripe_id_if_absent(user_id, &customer_id)
                    .await?
                {
                    tracing::info!(user_id = %user_id, "Stored new payment customer");

                    return Ok(customer_id);
                }

                // Lost the race, use the customer stored by the other request
                user_repo
                    .get(user_id)
                    .await?
                    .and_then(|user| user.stripe_id)
                    .ok_or_else(|| Error::from(AuthError::UserNotInDatabase(user_id)))
            })
        })
        .await
    }

    /// Verify, record and reconcile one webhook delivery
    ///
    /// Never fails: every failure is logged, recorded in the audit log and reported through
    /// the returned [`WebhookOutcome`].
    pub async fn handle_webhook(&self, payload: &[u8], signature: Option<&str>) -> WebhookOutcome {
        match self.try_handle_webhook(payload, signature).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Failed to handle payment webhook: {}", e);

                WebhookOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookOutcome, Error> {
        let event_repo = WebhookEventRepository::new(self.db);

        let verified = match signature {
            Some(signature) => self
                .provider
                .construct_event(payload, signature)
                .map_err(|e| e.to_string()),
            None => Err("Missing payment provider signature header".to_string()),
        };

        let event = match verified {
            Ok(event) => event,
            Err(reason) => {
                tracing::error!("Rejected payment webhook delivery: {}", reason);

                event_repo
                    .record_rejected(
                        UNVERIFIED_EVENT_TYPE.to_string(),
                        reason.clone(),
                        Duration::seconds(REJECTED_DELIVERY_WINDOW_SECS),
                    )
                    .await?;

                return Ok(WebhookOutcome::Rejected(reason));
            }
        };

        if let Some(existing) = event_repo.find_by_event_id(&event.id).await? {
            return match existing.status {
                WebhookEventStatus::Processed | WebhookEventStatus::Ignored => {
                    tracing::debug!(event_id = %event.id, "Ignoring redelivered payment webhook");

                    Ok(WebhookOutcome::Duplicate)
                }
                _ => self.reconcile(existing, &event).await,
            };
        }

        if !event.is_charge_succeeded() {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                "Ignoring payment webhook event type"
            );

            event_repo
                .create(
                    Some(event.id.clone()),
                    event.event_type.clone(),
                    WebhookEventStatus::Ignored,
                    Some(String::from_utf8_lossy(payload).into_owned()),
                    None,
                )
                .await?;

            return Ok(WebhookOutcome::Ignored);
        }

        let record = match event_repo
            .create(
                Some(event.id.clone()),
                event.event_type.clone(),
                WebhookEventStatus::Received,
                Some(String::from_utf8_lossy(payload).into_owned()),
                None,
            )
            .await
        {
            Ok(record) => record,
            // A concurrent delivery of the same event recorded it first
            Err(e) if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) => {
                return Ok(WebhookOutcome::Duplicate);
            }
            Err(e) => return Err(e.into()),
        };

        self.reconcile(record, &event).await
    }

    /// Re-run reconciliation of failed `charge.succeeded` events from their stored payload
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of events reconciled successfully
    pub async fn retry_failed_reconciliations(&self, max_attempts: i32) -> Result<usize, Error> {
        let event_repo = WebhookEventRepository::new(self.db);
        let events = event_repo.get_retryable(max_attempts).await?;

        let mut reconciled = 0;
        for record in events {
            let parsed = record
                .payload
                .as_deref()
                .ok_or_else(|| "No payload stored for event".to_string())
                .and_then(|payload| {
                    serde_json::from_str::<WebhookEvent>(payload).map_err(|e| e.to_string())
                });

            let outcome = match parsed {
                Ok(event) => self.reconcile(record, &event).await?,
                Err(reason) => {
                    event_repo
                        .record_outcome(record, WebhookEventStatus::Failed, Some(reason.clone()))
                        .await?;

                    WebhookOutcome::Failed(reason)
                }
            };

            if matches!(outcome, WebhookOutcome::Processed | WebhookOutcome::Duplicate) {
                reconciled += 1;
            }
        }

        Ok(reconciled)
    }

    /// Write the ledger row for a `charge.succeeded` event and mark its audit row processed
    /// in one transaction, or record the failure on the audit row
    async fn reconcile(
        &self,
        record: PaymentWebhookEventModel,
        event: &WebhookEvent,
    ) -> Result<WebhookOutcome, Error> {
        let txn = self.db.begin().await?;

        match record_connection_fee(&txn, event).await {
            Ok(inserted) => {
                WebhookEventRepository::new(&txn)
                    .record_outcome(record, WebhookEventStatus::Processed, None)
                    .await?;
                txn.commit().await?;

                if inserted {
                    tracing::info!(event_id = %event.id, "Recorded connection fee");

                    Ok(WebhookOutcome::Processed)
                } else {
                    tracing::debug!(event_id = %event.id, "Charge already recorded");

                    Ok(WebhookOutcome::Duplicate)
                }
            }
            Err(e) => {
                txn.rollback().await?;

                let reason = e.to_string();
                tracing::error!(
                    event_id = %event.id,
                    attempt = %(record.attempts + 1),
                    "Failed to reconcile payment webhook: {}",
                    reason
                );

                WebhookEventRepository::new(self.db)
                    .record_outcome(record, WebhookEventStatus::Failed, Some(reason.clone()))
                    .await?;

                Ok(WebhookOutcome::Failed(reason))
            }
        }
    }
}

/// Insert the ledger row for the charge of a `charge.succeeded` event
///
/// # Returns
/// - `Ok(true)` - A new row was written
/// - `Ok(false)` - The charge was already recorded
/// - `Err(Error::PaymentError)` - The charge references no known user or listing, or its
///   metadata is malformed
async fn record_connection_fee<C: ConnectionTrait>(
    db: &C,
    event: &WebhookEvent,
) -> Result<bool, Error> {
    let charge = event
        .charge()
        .map_err(|e| PaymentError::MalformedCharge(e.to_string()))?;

    let customer = charge
        .customer
        .clone()
        .ok_or_else(|| PaymentError::ChargeWithoutCustomer(charge.id.clone()))?;

    let book_id_metadata = charge.metadata.get("book_id").cloned();
    let book_id: i32 = book_id_metadata
        .as_deref()
        .and_then(|book_id| book_id.parse().ok())
        .ok_or_else(|| PaymentError::InvalidBookId {
            charge_id: charge.id.clone(),
            book_id: book_id_metadata.clone(),
        })?;

    let user = UserRepository::new(db)
        .find_by_stripe_id(&customer)
        .await?
        .ok_or(PaymentError::UnknownCustomer(customer))?;

    let listing = ListingRepository::new(db)
        .get(book_id)
        .await?
        .ok_or(PaymentError::UnknownListing(book_id))?;

    let inserted = ConnectionFeeRepository::new(db)
        .insert_if_absent(user.id, listing.id, &charge.id, charge.amount)
        .await?;

    Ok(inserted)
}

/// Surface a provider's refusal of a request to the client
fn provider_rejection(err: Error) -> Error {
    match err {
        Error::ProviderError(ProviderError::Rejected { status, body }) => {
            PaymentError::ProviderRejected { status, body }.into()
        }
        err => err,
    }
}
