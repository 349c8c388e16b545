use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000003_bookmeet_user::BookmeetUser, m20251101_000004_book_listing::BookListing,
};

static IDX_MEETUP_REQUEST_USER_ID_STATUS: &str = "idx-meetup_request-user_id-status";
static IDX_MEETUP_REQUEST_BOOK_LISTING_ID_STATUS: &str = "idx-meetup_request-book_listing_id-status";
static FK_MEETUP_REQUEST_USER_ID: &str = "fk-meetup_request-user_id";
static FK_MEETUP_REQUEST_BOOK_LISTING_ID: &str = "fk-meetup_request-book_listing_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MeetupRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(MeetupRequest::Id))
                    .col(integer(MeetupRequest::UserId))
                    .col(integer(MeetupRequest::BookListingId))
                    .col(timestamp(MeetupRequest::DateCreated))
                    .col(string_len(MeetupRequest::Status, 20))
                    .col(big_integer_null(MeetupRequest::LocationLatitude))
                    .col(big_integer_null(MeetupRequest::LocationLongitude))
                    .col(timestamp_null(MeetupRequest::MeetupTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MEETUP_REQUEST_USER_ID)
                            .from(MeetupRequest::Table, MeetupRequest::UserId)
                            .to(BookmeetUser::Table, BookmeetUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MEETUP_REQUEST_BOOK_LISTING_ID)
                            .from(MeetupRequest::Table, MeetupRequest::BookListingId)
                            .to(BookListing::Table, BookListing::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEETUP_REQUEST_USER_ID_STATUS)
                    .table(MeetupRequest::Table)
                    .col(MeetupRequest::UserId)
                    .col(MeetupRequest::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEETUP_REQUEST_BOOK_LISTING_ID_STATUS)
                    .table(MeetupRequest::Table)
                    .col(MeetupRequest::BookListingId)
                    .col(MeetupRequest::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEETUP_REQUEST_BOOK_LISTING_ID_STATUS)
                    .table(MeetupRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEETUP_REQUEST_USER_ID_STATUS)
                    .table(MeetupRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MeetupRequest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum MeetupRequest {
    Table,
    Id,
    UserId,
    BookListingId,
    DateCreated,
    Status,
    LocationLatitude,
    LocationLongitude,
    MeetupTime,
}
