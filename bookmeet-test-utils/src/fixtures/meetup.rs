use chrono::Utc;
use entity::sea_orm_active_enums::MeetupStatus;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn meetup<'a>(&'a mut self) -> MeetupFixtures<'a> {
        MeetupFixtures { setup: self }
    }
}

pub struct MeetupFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> MeetupFixtures<'a> {
    /// Insert a meetup request from `user_id` on `book_listing_id` without location or time
    pub async fn insert_meetup_request(
        &self,
        user_id: i32,
        book_listing_id: i32,
        status: MeetupStatus,
    ) -> Result<entity::meetup_request::Model, TestError> {
        Ok(
            entity::prelude::MeetupRequest::insert(entity::meetup_request::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                book_listing_id: ActiveValue::Set(book_listing_id),
                date_created: ActiveValue::Set(Utc::now().naive_utc()),
                status: ActiveValue::Set(status),
                location_latitude: ActiveValue::Set(None),
                location_longitude: ActiveValue::Set(None),
                meetup_time: ActiveValue::Set(None),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
