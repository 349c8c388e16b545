pub mod completed_listing;

use entity::sea_orm_active_enums::ListingStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Validated listing fields ready to be stored
#[derive(Clone, Debug)]
pub struct ListingFields {
    pub name: String,
    pub author: String,
    pub price_cents: i64,
    pub edition: i32,
    pub condition: String,
    pub class_number: String,
    pub professor: String,
    pub status: ListingStatus,
}

/// Column based ordering applied by the database
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingSort {
    Price,
    Name,
}

pub struct ListingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ListingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        owner_id: i32,
        listing: ListingFields,
    ) -> Result<entity::book_listing::Model, DbErr> {
        let listing = entity::book_listing::ActiveModel {
            owner_id: ActiveValue::Set(Some(owner_id)),
            buyer_id: ActiveValue::Set(None),
            name: ActiveValue::Set(listing.name),
            author: ActiveValue::Set(listing.author),
            price_cents: ActiveValue::Set(listing.price_cents),
            edition: ActiveValue::Set(listing.edition),
            condition: ActiveValue::Set(listing.condition),
            class_number: ActiveValue::Set(listing.class_number),
            professor: ActiveValue::Set(listing.professor),
            status: ActiveValue::Set(listing.status),
            ..Default::default()
        };

        listing.insert(self.db).await
    }

    pub async fn get(
        &self,
        listing_id: i32,
    ) -> Result<Option<entity::book_listing::Model>, DbErr> {
        entity::prelude::BookListing::find_by_id(listing_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        listing_ids: &[i32],
    ) -> Result<Vec<entity::book_listing::Model>, DbErr> {
        entity::prelude::BookListing::find()
            .filter(entity::book_listing::Column::Id.is_in(listing_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Find listings matching the exact-value filters
    ///
    /// Listings are ordered by `sort` when provided and by ID otherwise.
    pub async fn find(
        &self,
        owner_id: Option<i32>,
        edition: Option<i32>,
        sort: Option<(ListingSort, Order)>,
    ) -> Result<Vec<entity::book_listing::Model>, DbErr> {
        let mut query = entity::prelude::BookListing::find();

        if let Some(owner_id) = owner_id {
            query = query.filter(entity::book_listing::Column::OwnerId.eq(owner_id));
        }
        if let Some(edition) = edition {
            query = query.filter(entity::book_listing::Column::Edition.eq(edition));
        }

        query = match sort {
            Some((ListingSort::Price, order)) => {
                query.order_by(entity::book_listing::Column::PriceCents, order)
            }
            Some((ListingSort::Name, order)) => {
                query.order_by(entity::book_listing::Column::Name, order)
            }
            None => query,
        };

        query
            .order_by_asc(entity::book_listing::Column::Id)
            .all(self.db)
            .await
    }

    /// Replace a listing's fields, keeping its owner and buyer
    ///
    /// # Returns
    /// - `Some(listing)` with the updated listing, `None` if the listing does not exist
    pub async fn update(
        &self,
        listing_id: i32,
        listing: ListingFields,
    ) -> Result<Option<entity::book_listing::Model>, DbErr> {
        let existing = match entity::prelude::BookListing::find_by_id(listing_id)
            .one(self.db)
            .await?
        {
            Some(existing) => existing,
            None => return Ok(None),
        };

        let mut listing_am = existing.into_active_model();
        listing_am.name = ActiveValue::Set(listing.name);
        listing_am.author = ActiveValue::Set(listing.author);
        listing_am.price_cents = ActiveValue::Set(listing.price_cents);
        listing_am.edition = ActiveValue::Set(listing.edition);
        listing_am.condition = ActiveValue::Set(listing.condition);
        listing_am.class_number = ActiveValue::Set(listing.class_number);
        listing_am.professor = ActiveValue::Set(listing.professor);
        listing_am.status = ActiveValue::Set(listing.status);

        let listing = listing_am.update(self.db).await?;

        Ok(Some(listing))
    }

    /// Deletes a listing
    ///
    /// Returns OK regardless of the listing existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, listing_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::BookListing::delete_by_id(listing_id)
            .exec(self.db)
            .await
    }

    pub async fn exists_for_owner(&self, owner_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::BookListing::find()
            .filter(entity::book_listing::Column::OwnerId.eq(owner_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
