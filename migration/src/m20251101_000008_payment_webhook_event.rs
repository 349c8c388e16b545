use sea_orm_migration::{prelude::*, schema::*};

static IDX_PAYMENT_WEBHOOK_EVENT_STATUS: &str = "idx-payment_webhook_event-status";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentWebhookEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentWebhookEvent::Id))
                    .col(string_len_null(PaymentWebhookEvent::EventId, 255).unique_key())
                    .col(string_len(PaymentWebhookEvent::EventType, 255))
                    .col(string_len(PaymentWebhookEvent::Status, 20))
                    .col(text_null(PaymentWebhookEvent::Payload))
                    .col(text_null(PaymentWebhookEvent::Error))
                    .col(integer(PaymentWebhookEvent::Attempts).default(0))
                    .col(timestamp(PaymentWebhookEvent::ReceivedAt))
                    .col(timestamp_null(PaymentWebhookEvent::ProcessedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_WEBHOOK_EVENT_STATUS)
                    .table(PaymentWebhookEvent::Table)
                    .col(PaymentWebhookEvent::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PAYMENT_WEBHOOK_EVENT_STATUS)
                    .table(PaymentWebhookEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PaymentWebhookEvent::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PaymentWebhookEvent {
    Table,
    Id,
    EventId,
    EventType,
    Status,
    Payload,
    Error,
    Attempts,
    ReceivedAt,
    ProcessedAt,
}
