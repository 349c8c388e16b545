use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::user::UserDto;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatusDto {
    Active,
    Sold,
    Archived,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BookListingDto {
    pub owner: Option<UserDto>,
    pub id: i32,
    /// Price with two decimal places, e.g. `"45.00"`
    #[schema(value_type = String)]
    pub price: Decimal,
    pub author: String,
    pub name: String,
    pub edition: i32,
    pub condition: String,
    pub class_number: String,
    pub professor: String,
    pub status: ListingStatusDto,
}

/// Body used both to create a listing and to replace one
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BookListingRequestDto {
    pub name: String,
    pub author: String,
    /// At most 6 digits with 2 decimal places
    #[schema(value_type = String)]
    pub price: Decimal,
    pub edition: i32,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub class_number: String,
    #[serde(default)]
    pub professor: String,
    /// Defaults to `active` on creation and to the current status on update
    pub status: Option<ListingStatusDto>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// Case-insensitive substring of the author
    pub author: Option<String>,
    pub edition: Option<i32>,
    /// Owner user ID
    pub owner: Option<i32>,
    /// One of `price`, `-price`, `name`, `-name`, `rating`, `-rating`
    pub ordering: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CompletedListingDto {
    pub id: i32,
    pub book_listing: BookListingDto,
    pub seller_rating: Option<i32>,
    pub buyer_rating: Option<i32>,
}
