use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct ConnectionFeeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ConnectionFeeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Record a paid connection fee unless the charge was already recorded
    ///
    /// # Returns
    /// - `true` if a new ledger row was written
    /// - `false` if a row for `charge_id` already exists
    pub async fn insert_if_absent(
        &self,
        user_id: i32,
        book_listing_id: i32,
        charge_id: &str,
        amount: i64,
    ) -> Result<bool, DbErr> {
        let fee = entity::connection_fee_paid::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            book_listing_id: ActiveValue::Set(book_listing_id),
            charge_id: ActiveValue::Set(charge_id.to_string()),
            amount: ActiveValue::Set(amount),
            payment_date: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let rows_inserted = entity::prelude::ConnectionFeePaid::insert(fee)
            .on_conflict(
                OnConflict::column(entity::connection_fee_paid::Column::ChargeId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(rows_inserted == 1)
    }

    pub async fn get_by_charge_id(
        &self,
        charge_id: &str,
    ) -> Result<Vec<entity::connection_fee_paid::Model>, DbErr> {
        entity::prelude::ConnectionFeePaid::find()
            .filter(entity::connection_fee_paid::Column::ChargeId.eq(charge_id))
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use bookmeet_test_utils::prelude::*;

    use crate::server::data::payment::connection_fee::ConnectionFeeRepository;

    /// Expect the same charge to be recorded exactly once
    #[tokio::test]
    async fn records_each_charge_once() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let owner = test.user().insert_user("owner").await?;
        let buyer = test.user().insert_user("buyer").await?;
        let listing = test.listing().insert_listing(owner.id, "Calculus", 2000).await?;

        let repo = ConnectionFeeRepository::new(&test.state.db);
        let first = repo
            .insert_if_absent(buyer.id, listing.id, "ch_1", 100)
            .await?;
        let second = repo
            .insert_if_absent(buyer.id, listing.id, "ch_1", 100)
            .await?;

        assert!(first);
        assert!(!second);
        assert_eq!(repo.get_by_charge_id("ch_1").await?.len(), 1);

        Ok(())
    }

    /// Expect Error when the listing referenced by the fee does not exist
    #[tokio::test]
    async fn fails_for_nonexistent_listing() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let buyer = test.user().insert_user("buyer").await?;

        let repo = ConnectionFeeRepository::new(&test.state.db);
        let result = repo.insert_if_absent(buyer.id, 1, "ch_1", 100).await;

        assert!(result.is_err());

        Ok(())
    }
}
