pub mod university;

use chrono::Utc;
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::model::user::{CreateUserDto, UpdateUserDto};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new, unverified user
    ///
    /// # Arguments
    /// - `user`: Registration fields, the plaintext password is ignored
    /// - `password_hash`: argon2id PHC string of the user's password
    pub async fn create(
        &self,
        user: CreateUserDto,
        password_hash: String,
    ) -> Result<entity::bookmeet_user::Model, DbErr> {
        let user = entity::bookmeet_user::ActiveModel {
            username: ActiveValue::Set(user.username),
            email: ActiveValue::Set(user.email),
            password_hash: ActiveValue::Set(password_hash),
            first_name: ActiveValue::Set(user.first_name),
            last_name: ActiveValue::Set(user.last_name),
            university_id: ActiveValue::Set(user.university),
            phone_number: ActiveValue::Set(user.phone_number),
            is_verified: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            is_staff: ActiveValue::Set(false),
            stripe_id: ActiveValue::Set(None),
            date_joined: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::bookmeet_user::Model>, DbErr> {
        entity::prelude::BookmeetUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        user_ids: &[i32],
    ) -> Result<Vec<entity::bookmeet_user::Model>, DbErr> {
        entity::prelude::BookmeetUser::find()
            .filter(entity::bookmeet_user::Column::Id.is_in(user_ids.iter().copied()))
            .all(self.db)
            .await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::bookmeet_user::Model>, DbErr> {
        entity::prelude::BookmeetUser::find()
            .filter(entity::bookmeet_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::bookmeet_user::Model>, DbErr> {
        entity::prelude::BookmeetUser::find()
            .filter(entity::bookmeet_user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<entity::bookmeet_user::Model>, DbErr> {
        entity::prelude::BookmeetUser::find()
            .filter(entity::bookmeet_user::Column::PhoneNumber.eq(phone_number))
            .one(self.db)
            .await
    }

    /// Find the user a payment customer belongs to
    pub async fn find_by_stripe_id(
        &self,
        stripe_id: &str,
    ) -> Result<Option<entity::bookmeet_user::Model>, DbErr> {
        entity::prelude::BookmeetUser::find()
            .filter(entity::bookmeet_user::Column::StripeId.eq(stripe_id))
            .one(self.db)
            .await
    }

    /// Update the profile fields present in `update`
    ///
    /// Changing the phone number marks the user as unverified.
    ///
    /// # Returns
    /// - `Some(user)` with the updated user, `None` if the user does not exist
    pub async fn update_profile(
        &self,
        user_id: i32,
        update: UpdateUserDto,
    ) -> Result<Option<entity::bookmeet_user::Model>, DbErr> {
        let user = match entity::prelude::BookmeetUser::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let phone_changed = update
            .phone_number
            .as_ref()
            .is_some_and(|phone| user.phone_number.as_ref() != Some(phone));

        let mut user_am = user.into_active_model();
        if let Some(first_name) = update.first_name {
            user_am.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            user_am.last_name = ActiveValue::Set(last_name);
        }
        if let Some(university_id) = update.university {
            user_am.university_id = ActiveValue::Set(Some(university_id));
        }
        if phone_changed {
            user_am.phone_number = ActiveValue::Set(update.phone_number);
            user_am.is_verified = ActiveValue::Set(false);
        }

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Mark a user's phone number as verified
    ///
    /// Writes the column directly, leaving every other field untouched. Returns the number of
    /// rows affected, 0 if the user does not exist.
    pub async fn set_verified(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::BookmeetUser::update_many()
            .col_expr(entity::bookmeet_user::Column::IsVerified, Expr::value(true))
            .filter(entity::bookmeet_user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Store the user's payment customer unless one is already set
    ///
    /// # Returns
    /// - `true` if this call stored `stripe_id`
    /// - `false` if the user already had a customer (or does not exist)
    pub async fn set_stripe_id_if_absent(
        &self,
        user_id: i32,
        stripe_id: &str,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::BookmeetUser::update_many()
            .col_expr(
                entity::bookmeet_user::Column::StripeId,
                Expr::value(stripe_id.to_string()),
            )
            .filter(entity::bookmeet_user::Column::Id.eq(user_id))
            .filter(entity::bookmeet_user::Column::StripeId.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
