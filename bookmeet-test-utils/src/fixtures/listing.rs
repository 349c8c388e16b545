use entity::sea_orm_active_enums::ListingStatus;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn listing<'a>(&'a mut self) -> ListingFixtures<'a> {
        ListingFixtures { setup: self }
    }
}

pub struct ListingFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> ListingFixtures<'a> {
    /// Insert an active listing owned by `owner_id`
    pub async fn insert_listing(
        &self,
        owner_id: i32,
        name: &str,
        price_cents: i64,
    ) -> Result<entity::book_listing::Model, TestError> {
        self.insert_listing_with_status(owner_id, name, price_cents, ListingStatus::Active)
            .await
    }

    pub async fn insert_listing_with_status(
        &self,
        owner_id: i32,
        name: &str,
        price_cents: i64,
        status: ListingStatus,
    ) -> Result<entity::book_listing::Model, TestError> {
        Ok(
            entity::prelude::BookListing::insert(entity::book_listing::ActiveModel {
                owner_id: ActiveValue::Set(Some(owner_id)),
                buyer_id: ActiveValue::Set(None),
                name: ActiveValue::Set(name.to_string()),
                author: ActiveValue::Set("Cormen".to_string()),
                price_cents: ActiveValue::Set(price_cents),
                edition: ActiveValue::Set(3),
                condition: ActiveValue::Set("Good".to_string()),
                class_number: ActiveValue::Set("CS 201".to_string()),
                professor: ActiveValue::Set(String::new()),
                status: ActiveValue::Set(status),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Mark a listing as completed with the provided half star ratings
    pub async fn insert_completed_listing(
        &self,
        book_listing_id: i32,
        seller_rating: Option<i32>,
        buyer_rating: Option<i32>,
    ) -> Result<entity::completed_listing::Model, TestError> {
        Ok(
            entity::prelude::CompletedListing::insert(entity::completed_listing::ActiveModel {
                book_listing_id: ActiveValue::Set(book_listing_id),
                seller_rating: ActiveValue::Set(seller_rating),
                buyer_rating: ActiveValue::Set(buyer_rating),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
