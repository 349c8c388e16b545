use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Placeholder rendered in place of an average when a user has no ratings yet
pub const NO_RATINGS: &str = "No Ratings";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UniversityDto {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub alpha_two_code: String,
}

/// Average of a user's half star ratings, serialized as a number or as `"No Ratings"`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rating(pub Option<f64>);

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(average) => serializer.serialize_f64(average),
            None => serializer.serialize_str(NO_RATINGS),
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Average(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Average(average) => Rating(Some(average)),
            Raw::Text(_) => Rating(None),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// First and last name joined by a space
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub university: Option<UniversityDto>,
    pub phone_number: Option<String>,
    pub date_joined: DateTime<Utc>,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_verified: bool,
    pub stripe_id: Option<String>,
    /// Average rating received as a seller
    #[schema(value_type = Object)]
    pub seller_rating: Rating,
    /// Average rating received as a buyer
    #[schema(value_type = Object)]
    pub buyer_rating: Rating,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// University ID
    pub university: Option<i32>,
    /// E.164 phone number, e.g. `+15555550100`
    pub phone_number: Option<String>,
}

/// Profile fields the current user may change, omitted fields are left untouched
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university: Option<i32>,
    /// Changing the phone number requires verifying it again
    pub phone_number: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}
