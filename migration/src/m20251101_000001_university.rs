use sea_orm_migration::{prelude::*, schema::*};

static IDX_UNIVERSITY_NAME: &str = "idx-university-name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(University::Table)
                    .if_not_exists()
                    .col(pk_auto(University::Id))
                    .col(string_len_uniq(University::Name, 255))
                    .col(string_len(University::Country, 255))
                    .col(string_len(University::AlphaTwoCode, 2))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_UNIVERSITY_NAME)
                    .table(University::Table)
                    .col(University::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_UNIVERSITY_NAME)
                    .table(University::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(University::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum University {
    Table,
    Id,
    Name,
    Country,
    AlphaTwoCode,
}
