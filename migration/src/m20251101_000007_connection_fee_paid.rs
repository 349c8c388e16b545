use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000003_bookmeet_user::BookmeetUser, m20251101_000004_book_listing::BookListing,
};

static IDX_CONNECTION_FEE_PAID_USER_ID: &str = "idx-connection_fee_paid-user_id";
static FK_CONNECTION_FEE_PAID_USER_ID: &str = "fk-connection_fee_paid-user_id";
static FK_CONNECTION_FEE_PAID_BOOK_LISTING_ID: &str = "fk-connection_fee_paid-book_listing_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // `charge_id` is unique so webhook redelivery can never record a charge twice
        manager
            .create_table(
                Table::create()
                    .table(ConnectionFeePaid::Table)
                    .if_not_exists()
                    .col(pk_auto(ConnectionFeePaid::Id))
                    .col(integer(ConnectionFeePaid::UserId))
                    .col(integer(ConnectionFeePaid::BookListingId))
                    .col(string_len_uniq(ConnectionFeePaid::ChargeId, 255))
                    .col(big_integer(ConnectionFeePaid::Amount))
                    .col(timestamp(ConnectionFeePaid::PaymentDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CONNECTION_FEE_PAID_USER_ID)
                            .from(ConnectionFeePaid::Table, ConnectionFeePaid::UserId)
                            .to(BookmeetUser::Table, BookmeetUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CONNECTION_FEE_PAID_BOOK_LISTING_ID)
                            .from(ConnectionFeePaid::Table, ConnectionFeePaid::BookListingId)
                            .to(BookListing::Table, BookListing::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CONNECTION_FEE_PAID_USER_ID)
                    .table(ConnectionFeePaid::Table)
                    .col(ConnectionFeePaid::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CONNECTION_FEE_PAID_USER_ID)
                    .table(ConnectionFeePaid::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ConnectionFeePaid::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ConnectionFeePaid {
    Table,
    Id,
    UserId,
    BookListingId,
    ChargeId,
    Amount,
    PaymentDate,
}
