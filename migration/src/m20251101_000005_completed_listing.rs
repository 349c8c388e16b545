use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_book_listing::BookListing;

static FK_COMPLETED_LISTING_BOOK_LISTING_ID: &str = "fk-completed_listing-book_listing_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Ratings are stored in half stars, 0..=10
        manager
            .create_table(
                Table::create()
                    .table(CompletedListing::Table)
                    .if_not_exists()
                    .col(pk_auto(CompletedListing::Id))
                    .col(integer_uniq(CompletedListing::BookListingId))
                    .col(integer_null(CompletedListing::SellerRating))
                    .col(integer_null(CompletedListing::BuyerRating))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMPLETED_LISTING_BOOK_LISTING_ID)
                            .from(CompletedListing::Table, CompletedListing::BookListingId)
                            .to(BookListing::Table, BookListing::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompletedListing::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CompletedListing {
    Table,
    Id,
    BookListingId,
    SellerRating,
    BuyerRating,
}
