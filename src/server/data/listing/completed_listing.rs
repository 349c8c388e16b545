use std::collections::HashMap;

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

/// Average ratings received by one user, in half stars
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UserRatings {
    /// Average over listings the user sold
    pub seller: Option<f64>,
    /// Average over listings the user bought
    pub buyer: Option<f64>,
}

pub struct CompletedListingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompletedListingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get the completed listings of every listing owned by `owner_id`, with their listing
    pub async fn get_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<(entity::completed_listing::Model, entity::book_listing::Model)>, DbErr> {
        let rows = entity::prelude::CompletedListing::find()
            .find_also_related(entity::prelude::BookListing)
            .filter(entity::book_listing::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::completed_listing::Column::Id)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(completed, listing)| listing.map(|listing| (completed, listing)))
            .collect())
    }

    /// Average seller and buyer ratings for each of `user_ids` using a single query
    ///
    /// Users without any completed listing are absent from the map.
    pub async fn get_ratings_for_users(
        &self,
        user_ids: &[i32],
    ) -> Result<HashMap<i32, UserRatings>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entity::prelude::CompletedListing::find()
            .find_also_related(entity::prelude::BookListing)
            .filter(
                Condition::any()
                    .add(entity::book_listing::Column::OwnerId.is_in(user_ids.iter().copied()))
                    .add(entity::book_listing::Column::BuyerId.is_in(user_ids.iter().copied())),
            )
            .all(self.db)
            .await?;

        // (sum, count) of seller and buyer ratings per user
        let mut totals: HashMap<i32, ((i64, i64), (i64, i64))> = HashMap::new();
        for (completed, listing) in rows {
            let Some(listing) = listing else { continue };

            if let (Some(owner_id), Some(rating)) = (listing.owner_id, completed.seller_rating) {
                let (seller, _) = totals.entry(owner_id).or_default();
                seller.0 += i64::from(rating);
                seller.1 += 1;
            }
            if let (Some(buyer_id), Some(rating)) = (listing.buyer_id, completed.buyer_rating) {
                let (_, buyer) = totals.entry(buyer_id).or_default();
                buyer.0 += i64::from(rating);
                buyer.1 += 1;
            }
        }

        let average = |(sum, count): (i64, i64)| (count > 0).then(|| sum as f64 / count as f64);

        Ok(totals
            .into_iter()
            .filter(|(user_id, _)| user_ids.contains(user_id))
            .map(|(user_id, (seller, buyer))| {
                (
                    user_id,
                    UserRatings {
                        seller: average(seller),
                        buyer: average(buyer),
                    },
                )
            })
            .collect())
    }
}
