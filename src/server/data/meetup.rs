use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::MeetupStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct MeetupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MeetupRepository<'a, C> {
    /// Creates a new instance of [`MeetupRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a pending meetup request
    ///
    /// # Arguments
    /// - `user_id`: ID of the requesting user
    /// - `book_listing_id`: ID of the listing to meet up for
    /// - `location`: Optional (latitude, longitude) in micro-degrees
    /// - `meetup_time`: Optional proposed time of the meetup
    pub async fn create(
        &self,
        user_id: i32,
        book_listing_id: i32,
        location: Option<(i64, i64)>,
        meetup_time: Option<NaiveDateTime>,
    ) -> Result<entity::meetup_request::Model, DbErr> {
        let meetup_request = entity::meetup_request::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            book_listing_id: ActiveValue::Set(book_listing_id),
            date_created: ActiveValue::Set(Utc::now().naive_utc()),
            status: ActiveValue::Set(MeetupStatus::Pending),
            location_latitude: ActiveValue::Set(location.map(|(latitude, _)| latitude)),
            location_longitude: ActiveValue::Set(location.map(|(_, longitude)| longitude)),
            meetup_time: ActiveValue::Set(meetup_time),
            ..Default::default()
        };

        meetup_request.insert(self.db).await
    }

    /// Get a meetup request together with the listing it is for
    pub async fn get_with_listing(
        &self,
        meetup_request_id: i32,
    ) -> Result<
        Option<(
            entity::meetup_request::Model,
            Option<entity::book_listing::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::MeetupRequest::find_by_id(meetup_request_id)
            .find_also_related(entity::prelude::BookListing)
            .one(self.db)
            .await
    }

    /// Set the status of a meetup request
    pub async fn update_status(
        &self,
        meetup_request: entity::meetup_request::Model,
        status: MeetupStatus,
    ) -> Result<entity::meetup_request::Model, DbErr> {
        let mut meetup_request_am = meetup_request.into_active_model();
        meetup_request_am.status = ActiveValue::Set(status);

        meetup_request_am.update(self.db).await
    }

    /// Pending requests created by `user_id`
    pub async fn list_pending_by_requester(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::meetup_request::Model>, DbErr> {
        entity::prelude::MeetupRequest::find()
            .filter(entity::meetup_request::Column::UserId.eq(user_id))
            .filter(entity::meetup_request::Column::Status.eq(MeetupStatus::Pending))
            .order_by_asc(entity::meetup_request::Column::Id)
            .all(self.db)
            .await
    }

    /// Pending requests on listings owned by `owner_id`
    pub async fn list_pending_for_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<entity::meetup_request::Model>, DbErr> {
        entity::prelude::MeetupRequest::find()
            .inner_join(entity::prelude::BookListing)
            .filter(entity::book_listing::Column::OwnerId.eq(owner_id))
            .filter(entity::meetup_request::Column::Status.eq(MeetupStatus::Pending))
            .order_by_asc(entity::meetup_request::Column::Id)
            .all(self.db)
            .await
    }

    /// Accepted requests where `user_id` is either the requester or the listing owner
    pub async fn list_accepted_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::meetup_request::Model>, DbErr> {
        entity::prelude::MeetupRequest::find()
            .inner_join(entity::prelude::BookListing)
            .filter(entity::meetup_request::Column::Status.eq(MeetupStatus::Accepted))
            .filter(
                Condition::any()
                    .add(entity::meetup_request::Column::UserId.eq(user_id))
                    .add(entity::book_listing::Column::OwnerId.eq(user_id)),
            )
            .order_by_asc(entity::meetup_request::Column::Id)
            .all(self.db)
            .await
    }
}
