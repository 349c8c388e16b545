use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_university::University;

static IDX_USER_USERNAME: &str = "idx-bookmeet_user-username";
static IDX_USER_FIRST_LAST_NAME: &str = "idx-bookmeet_user-first_name-last_name";
static FK_USER_UNIVERSITY_ID: &str = "fk-bookmeet_user-university_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookmeetUser::Table)
                    .if_not_exists()
                    .col(pk_auto(BookmeetUser::Id))
                    .col(string_len_uniq(BookmeetUser::Username, 32))
                    .col(string_len_uniq(BookmeetUser::Email, 255))
                    .col(string(BookmeetUser::PasswordHash))
                    .col(string_len(BookmeetUser::FirstName, 32))
                    .col(string_len(BookmeetUser::LastName, 32))
                    .col(integer_null(BookmeetUser::UniversityId))
                    .col(string_len_null(BookmeetUser::PhoneNumber, 32).unique_key())
                    .col(boolean(BookmeetUser::IsVerified).default(false))
                    .col(boolean(BookmeetUser::IsActive).default(true))
                    .col(boolean(BookmeetUser::IsStaff).default(false))
                    .col(string_len_null(BookmeetUser::StripeId, 32).unique_key())
                    .col(timestamp(BookmeetUser::DateJoined))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USER_UNIVERSITY_ID)
                            .from(BookmeetUser::Table, BookmeetUser::UniversityId)
                            .to(University::Table, University::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_USERNAME)
                    .table(BookmeetUser::Table)
                    .col(BookmeetUser::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_FIRST_LAST_NAME)
                    .table(BookmeetUser::Table)
                    .col(BookmeetUser::FirstName)
                    .col(BookmeetUser::LastName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_FIRST_LAST_NAME)
                    .table(BookmeetUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_USERNAME)
                    .table(BookmeetUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BookmeetUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum BookmeetUser {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    UniversityId,
    PhoneNumber,
    IsVerified,
    IsActive,
    IsStaff,
    StripeId,
    DateJoined,
}
