use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::WebhookEventStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct WebhookEventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WebhookEventRepository<'a, C> {
    /// Creates a new instance of [`WebhookEventRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Record a webhook delivery
    ///
    /// # Arguments
    /// - `event_id`: Provider event ID, `None` for deliveries that could not be verified
    /// - `event_type`: Provider event type
    /// - `status`: Initial status of the delivery
    /// - `payload`: Verified raw body retained for re-reconciliation
    /// - `error`: Reason the delivery was rejected, if it was
    pub async fn create(
        &self,
        event_id: Option<String>,
        event_type: String,
        status: WebhookEventStatus,
        payload: Option<String>,
        error: Option<String>,
    ) -> Result<entity::payment_webhook_event::Model, DbErr> {
        let event = entity::payment_webhook_event::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            event_type: ActiveValue::Set(event_type),
            status: ActiveValue::Set(status),
            payload: ActiveValue::Set(payload),
            error: ActiveValue::Set(error),
            attempts: ActiveValue::Set(0),
            received_at: ActiveValue::Set(Utc::now().naive_utc()),
            processed_at: ActiveValue::Set(None),
            ..Default::default()
        };

        event.insert(self.db).await
    }

    /// Record a delivery that failed verification
    ///
    /// Rejections arriving within `window` of the latest rejected row are folded into that row,
    /// keeping the most recent reason and counting the deliveries in `attempts`.
    pub async fn record_rejected(
        &self,
        event_type: String,
        error: String,
        window: Duration,
    ) -> Result<entity::payment_webhook_event::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let recent = entity::prelude::PaymentWebhookEvent::find()
            .filter(entity::payment_webhook_event::Column::Status.eq(WebhookEventStatus::Rejected))
            .filter(entity::payment_webhook_event::Column::ReceivedAt.gte(now - window))
            .order_by_desc(entity::payment_webhook_event::Column::Id)
            .one(self.db)
            .await?;

        match recent {
            Some(event) => {
                let attempts = event.attempts + 1;

                let mut event_am = event.into_active_model();
                event_am.error = ActiveValue::Set(Some(error));
                event_am.attempts = ActiveValue::Set(attempts);
                event_am.processed_at = ActiveValue::Set(Some(now));

                event_am.update(self.db).await
            }
            None => {
                let event = entity::payment_webhook_event::ActiveModel {
                    event_id: ActiveValue::Set(None),
                    event_type: ActiveValue::Set(event_type),
                    status: ActiveValue::Set(WebhookEventStatus::Rejected),
                    payload: ActiveValue::Set(None),
                    error: ActiveValue::Set(Some(error)),
                    attempts: ActiveValue::Set(1),
                    received_at: ActiveValue::Set(now),
                    processed_at: ActiveValue::Set(Some(now)),
                    ..Default::default()
                };

                event.insert(self.db).await
            }
        }
    }

    pub async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<entity::payment_webhook_event::Model>, DbErr> {
        entity::prelude::PaymentWebhookEvent::find()
            .filter(entity::payment_webhook_event::Column::EventId.eq(event_id))
            .one(self.db)
            .await
    }

    /// Store the outcome of a reconciliation attempt, counting the attempt
    pub async fn record_outcome(
        &self,
        event: entity::payment_webhook_event::Model,
        status: WebhookEventStatus,
        error: Option<String>,
    ) -> Result<entity::payment_webhook_event::Model, DbErr> {
        let attempts = event.attempts + 1;

        let mut event_am = event.into_active_model();
        event_am.status = ActiveValue::Set(status);
        event_am.error = ActiveValue::Set(error);
        event_am.attempts = ActiveValue::Set(attempts);
        event_am.processed_at = ActiveValue::Set(Some(Utc::now().naive_utc()));

        event_am.update(self.db).await
    }

    /// Failed `charge.succeeded` events with fewer than `max_attempts` reconciliation attempts
    pub async fn get_retryable(
        &self,
        max_attempts: i32,
    ) -> Result<Vec<entity::payment_webhook_event::Model>, DbErr> {
        entity::prelude::PaymentWebhookEvent::find()
            .filter(entity::payment_webhook_event::Column::Status.eq(WebhookEventStatus::Failed))
            .filter(
                entity::payment_webhook_event::Column::EventType
                    .eq(providers::WebhookEvent::CHARGE_SUCCEEDED),
            )
            .filter(entity::payment_webhook_event::Column::Attempts.lt(max_attempts))
            .order_by_asc(entity::payment_webhook_event::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use bookmeet_test_utils::prelude::*;
        use chrono::Duration;
        use entity::sea_orm_active_enums::WebhookEventStatus;
        use sea_orm::EntityTrait;

        use crate::server::data::payment::webhook_event::WebhookEventRepository;

        /// Expect multiple unverified deliveries to be recorded without an event ID
        #[tokio::test]
        async fn records_rejected_deliveries_without_event_id() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;

            let repo = WebhookEventRepository::new(&test.state.db);
            for _ in 0..2 {
                let event = repo
                    .create(
                        None,
                        "unknown".to_string(),
                        WebhookEventStatus::Rejected,
                        None,
                        Some("No v1 signature matches the payload".to_string()),
                    )
                    .await?;
                assert!(event.event_id.is_none());
            }

            Ok(())
        }

        /// Expect rejections within the window to share one row counting each delivery
        #[tokio::test]
        async fn folds_recent_rejections_into_one_row() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;

            let repo = WebhookEventRepository::new(&test.state.db);
            let first = repo
                .record_rejected(
                    "unknown".to_string(),
                    "Missing payment provider signature header".to_string(),
                    Duration::minutes(1),
                )
                .await?;
            let second = repo
                .record_rejected(
                    "unknown".to_string(),
                    "No v1 signature matches the payload".to_string(),
                    Duration::minutes(1),
                )
                .await?;

            assert_eq!(first.id, second.id);
            assert_eq!(second.attempts, 2);
            assert_eq!(
                second.error.as_deref(),
                Some("No v1 signature matches the payload")
            );
            let rows = entity::prelude::PaymentWebhookEvent::find()
                .all(&test.state.db)
                .await?;
            assert_eq!(rows.len(), 1);

            Ok(())
        }

        /// Expect a rejection outside the window to start a new row
        #[tokio::test]
        async fn starts_new_row_after_window() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;

            let repo = WebhookEventRepository::new(&test.state.db);
            let first = repo
                .record_rejected(
                    "unknown".to_string(),
                    "Missing payment provider signature header".to_string(),
                    Duration::zero(),
                )
                .await?;
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            let second = repo
                .record_rejected(
                    "unknown".to_string(),
                    "Missing payment provider signature header".to_string(),
                    Duration::zero(),
                )
                .await?;

            assert_ne!(first.id, second.id);
            assert_eq!(second.attempts, 1);

            Ok(())
        }

        /// Expect Error when recording the same event ID twice
        #[tokio::test]
        async fn fails_for_duplicate_event_id() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;

            let repo = WebhookEventRepository::new(&test.state.db);
            let create = || {
                repo.create(
                    Some("evt_1".to_string()),
                    "charge.succeeded".to_string(),
                    WebhookEventStatus::Received,
                    Some("{}".to_string()),
                    None,
                )
            };
            create().await?;
            let result = create().await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod get_retryable {
        use bookmeet_test_utils::prelude::*;
        use entity::sea_orm_active_enums::WebhookEventStatus;

        use crate::server::data::payment::webhook_event::WebhookEventRepository;

        /// Expect only failed events below the attempt limit to be retried
        #[tokio::test]
        async fn returns_failed_events_below_limit() -> Result<(), TestError> {
            let mut test = test_setup_with_marketplace_tables!()?;
            let retryable = test.payment().charge_succeeded_event("evt_1", "ch_1", "cus_1", "1");
            let exhausted = test.payment().charge_succeeded_event("evt_2", "ch_2", "cus_1", "1");
            let retryable = test
                .payment()
                .insert_failed_webhook_event(&retryable, 1)
                .await?;
            test.payment()
                .insert_failed_webhook_event(&exhausted, 5)
                .await?;

            let repo = WebhookEventRepository::new(&test.state.db);
            let result = repo.get_retryable(5).await?;

            assert_eq!(result.len(), 1);
            assert_eq!(result[0].id, retryable.id);

            // Processed events are no longer retried
            repo.record_outcome(result[0].clone(), WebhookEventStatus::Processed, None)
                .await?;
            assert!(repo.get_retryable(5).await?.is_empty());

            Ok(())
        }
    }

    mod record_outcome {
        use bookmeet_test_utils::prelude::*;
        use entity::sea_orm_active_enums::WebhookEventStatus;

        use crate::server::data::payment::webhook_event::WebhookEventRepository;

        /// Expect the attempt to be counted and the error cleared on success
        #[tokio::test]
        async fn counts_attempt_and_clears_error() -> Result<(), TestError> {
            let mut test = test_setup_with_marketplace_tables!()?;
            let event = test.payment().charge_succeeded_event("evt_1", "ch_1", "cus_1", "1");
            let event = test.payment().insert_failed_webhook_event(&event, 2).await?;

            let repo = WebhookEventRepository::new(&test.state.db);
            let result = repo
                .record_outcome(event, WebhookEventStatus::Processed, None)
                .await?;

            assert_eq!(result.attempts, 3);
            assert_eq!(result.status, WebhookEventStatus::Processed);
            assert!(result.error.is_none());
            assert!(result.processed_at.is_some());

            Ok(())
        }
    }
}
