use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PHONE_NUMBER, error::TestError, TestSetup};

impl TestSetup {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> UserFixtures<'a> {
    fn active_model(username: &str) -> entity::bookmeet_user::ActiveModel {
        entity::bookmeet_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(format!("{}@school.edu", username)),
            password_hash: ActiveValue::Set("unusable".to_string()),
            first_name: ActiveValue::Set(username.to_string()),
            last_name: ActiveValue::Set("Tester".to_string()),
            university_id: ActiveValue::Set(None),
            phone_number: ActiveValue::Set(None),
            is_verified: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            is_staff: ActiveValue::Set(false),
            stripe_id: ActiveValue::Set(None),
            date_joined: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }

    /// Insert a user whose email is `{username}@school.edu`. The stored password hash
    /// matches no password, use the auth service to create users that need to log in.
    pub async fn insert_user(
        &self,
        username: &str,
    ) -> Result<entity::bookmeet_user::Model, TestError> {
        Ok(
            entity::prelude::BookmeetUser::insert(Self::active_model(username))
                .exec_with_returning(&self.setup.state.db)
                .await?,
        )
    }

    /// Insert an unverified user with [`TEST_PHONE_NUMBER`]
    pub async fn insert_user_with_phone(
        &self,
        username: &str,
    ) -> Result<entity::bookmeet_user::Model, TestError> {
        let mut user = Self::active_model(username);
        user.phone_number = ActiveValue::Set(Some(TEST_PHONE_NUMBER.to_string()));

        Ok(entity::prelude::BookmeetUser::insert(user)
            .exec_with_returning(&self.setup.state.db)
            .await?)
    }

    /// Insert a user that already has a payment customer
    pub async fn insert_user_with_stripe_id(
        &self,
        username: &str,
        stripe_id: &str,
    ) -> Result<entity::bookmeet_user::Model, TestError> {
        let mut user = Self::active_model(username);
        user.stripe_id = ActiveValue::Set(Some(stripe_id.to_string()));

        Ok(entity::prelude::BookmeetUser::insert(user)
            .exec_with_returning(&self.setup.state.db)
            .await?)
    }

    pub async fn insert_university(
        &self,
        name: &str,
    ) -> Result<entity::university::Model, TestError> {
        Ok(
            entity::prelude::University::insert(entity::university::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                country: ActiveValue::Set("United States".to_string()),
                alpha_two_code: ActiveValue::Set("US".to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
