use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_university::University;

static IDX_UNIVERSITY_DOMAIN_UNIVERSITY_ID: &str = "idx-university_domain-university_id";
static FK_UNIVERSITY_DOMAIN_UNIVERSITY_ID: &str = "fk-university_domain-university_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UniversityDomain::Table)
                    .if_not_exists()
                    .col(pk_auto(UniversityDomain::Id))
                    .col(string_len_uniq(UniversityDomain::Name, 255))
                    .col(integer(UniversityDomain::UniversityId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_UNIVERSITY_DOMAIN_UNIVERSITY_ID)
                            .from(UniversityDomain::Table, UniversityDomain::UniversityId)
                            .to(University::Table, University::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_UNIVERSITY_DOMAIN_UNIVERSITY_ID)
                    .table(UniversityDomain::Table)
                    .col(UniversityDomain::UniversityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_UNIVERSITY_DOMAIN_UNIVERSITY_ID)
                    .table(UniversityDomain::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UniversityDomain::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum UniversityDomain {
    Table,
    Id,
    Name,
    UniversityId,
}
