use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000003_bookmeet_user::BookmeetUser;

static IDX_BOOK_LISTING_OWNER_ID: &str = "idx-book_listing-owner_id";
static FK_BOOK_LISTING_OWNER_ID: &str = "fk-book_listing-owner_id";
static FK_BOOK_LISTING_BUYER_ID: &str = "fk-book_listing-buyer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookListing::Table)
                    .if_not_exists()
                    .col(pk_auto(BookListing::Id))
                    .col(integer_null(BookListing::OwnerId))
                    .col(integer_null(BookListing::BuyerId))
                    .col(string_len(BookListing::Name, 50))
                    .col(string_len(BookListing::Author, 50))
                    .col(big_integer(BookListing::PriceCents))
                    .col(integer(BookListing::Edition))
                    .col(string_len(BookListing::Condition, 255).default(""))
                    .col(string_len(BookListing::ClassNumber, 255).default(""))
                    .col(string_len(BookListing::Professor, 255).default(""))
                    .col(string_len(BookListing::Status, 10).default("active"))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_BOOK_LISTING_OWNER_ID)
                            .from(BookListing::Table, BookListing::OwnerId)
                            .to(BookmeetUser::Table, BookmeetUser::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_BOOK_LISTING_BUYER_ID)
                            .from(BookListing::Table, BookListing::BuyerId)
                            .to(BookmeetUser::Table, BookmeetUser::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BOOK_LISTING_OWNER_ID)
                    .table(BookListing::Table)
                    .col(BookListing::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_BOOK_LISTING_OWNER_ID)
                    .table(BookListing::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BookListing::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum BookListing {
    Table,
    Id,
    OwnerId,
    BuyerId,
    Name,
    Author,
    PriceCents,
    Edition,
    Condition,
    ClassNumber,
    Professor,
    Status,
}
