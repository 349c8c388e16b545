pub use sea_orm_migration::prelude::*;

mod m20251101_000001_university;
mod m20251101_000002_university_domain;
mod m20251101_000003_bookmeet_user;
mod m20251101_000004_book_listing;
mod m20251101_000005_completed_listing;
mod m20251101_000006_meetup_request;
mod m20251101_000007_connection_fee_paid;
mod m20251101_000008_payment_webhook_event;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_university::Migration),
            Box::new(m20251101_000002_university_domain::Migration),
            Box::new(m20251101_000003_bookmeet_user::Migration),
            Box::new(m20251101_000004_book_listing::Migration),
            Box::new(m20251101_000005_completed_listing::Migration),
            Box::new(m20251101_000006_meetup_request::Migration),
            Box::new(m20251101_000007_connection_fee_paid::Migration),
            Box::new(m20251101_000008_payment_webhook_event::Migration),
        ]
    }
}
