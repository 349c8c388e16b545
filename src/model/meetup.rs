use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{listing::BookListingDto, user::UserDto};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MeetupStatusDto {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    #[schema(value_type = String)]
    pub latitude: Decimal,
    #[schema(value_type = String)]
    pub longitude: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMeetupRequestDto {
    #[serde(rename = "bookId")]
    pub book_id: Option<i32>,
    pub location: Option<LocationDto>,
    pub meetup_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AcceptMeetupRequestDto {
    #[serde(rename = "meetupRequestId")]
    pub meetup_request_id: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MeetupRequestDto {
    pub id: i32,
    pub book_listing: Option<BookListingDto>,
    /// The user who requested the meetup
    pub user: Option<UserDto>,
    pub date_created: DateTime<Utc>,
    pub status: MeetupStatusDto,
    /// Degrees with six decimal places
    #[schema(value_type = Option<String>)]
    pub location_latitude: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub location_longitude: Option<Decimal>,
    pub meetup_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MyMeetupRequestsDto {
    /// Pending requests made by the current user
    pub user_created: Vec<MeetupRequestDto>,
    /// Pending requests on listings owned by the current user
    pub for_users_books: Vec<MeetupRequestDto>,
    /// Accepted requests where the current user is the requester or the listing owner
    pub scheduled_meetups: Vec<MeetupRequestDto>,
}
