//! User service layer.
//!
//! Builds the public representation of users, including their university and rating
//! averages, and applies profile updates.

use std::collections::{HashMap, HashSet};

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

use crate::{
    model::user::{Rating, UniversityDto, UpdateUserDto, UserDto},
    server::{
        data::{
            listing::completed_listing::{CompletedListingRepository, UserRatings},
            user::{university::UniversityRepository, UserRepository},
        },
        error::{user::UserError, Error},
        model::db::{UniversityModel, UserModel},
    },
};

const MAX_NAME_LENGTH: usize = 150;

/// Service for reading and updating user accounts.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of UserService.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user with their university and rating averages.
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let Some(user) = UserRepository::new(self.db).get(user_id).await? else {
            return Ok(None);
        };

        let mut dtos = user_dtos(self.db, vec![user]).await?;

        Ok(dtos.remove(&user_id))
    }

    /// Applies a profile update for the current user.
    ///
    /// Omitted fields are left untouched. A new phone number must be in E.164 format and
    /// not belong to another user, it also resets the user's verification.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The updated user
    /// - `Err(Error::UserError)` - Invalid field, unknown university or phone number taken
    pub async fn update_user(&self, user_id: i32, update: UpdateUserDto) -> Result<UserDto, Error> {
        if let Some(first_name) = &update.first_name {
            validate_name("first_name", first_name)?;
        }
        if let Some(last_name) = &update.last_name {
            validate_name("last_name", last_name)?;
        }
        if let Some(university_id) = update.university {
            if UniversityRepository::new(self.db)
                .get(university_id)
                .await?
                .is_none()
            {
                return Err(UserError::UniversityNotFound(university_id).into());
            }
        }

        let user_repo = UserRepository::new(self.db);
        if let Some(phone_number) = &update.phone_number {
            validate_phone_number(phone_number)?;

            if let Some(owner) = user_repo.find_by_phone_number(phone_number).await? {
                if owner.id != user_id {
                    return Err(UserError::PhoneNumberTaken.into());
                }
            }
        }

        let user = user_repo
            .update_profile(user_id, update)
            .await
            .map_err(map_unique_violation)?
            .ok_or(UserError::NotFound(user_id))?;

        let mut dtos = user_dtos(self.db, vec![user]).await?;

        dtos.remove(&user_id)
            .ok_or_else(|| Error::InternalError(format!("Failed to build user ID {}", user_id)))
    }
}

/// Build the public representation of `users`, keyed by user ID
///
/// Universities and rating averages are loaded with one query each regardless of the
/// number of users.
pub async fn user_dtos<C: ConnectionTrait>(
    db: &C,
    users: Vec<UserModel>,
) -> Result<HashMap<i32, UserDto>, DbErr> {
    if users.is_empty() {
        return Ok(HashMap::new());
    }

    let university_ids: Vec<i32> = users
        .iter()
        .filter_map(|user| user.university_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let user_ids: Vec<i32> = users.iter().map(|user| user.id).collect();

    let universities: HashMap<i32, UniversityModel> = UniversityRepository::new(db)
        .get_many(&university_ids)
        .await?
        .into_iter()
        .map(|university| (university.id, university))
        .collect();
    let ratings = CompletedListingRepository::new(db)
        .get_ratings_for_users(&user_ids)
        .await?;

    Ok(users
        .into_iter()
        .map(|user| {
            let university = user
                .university_id
                .and_then(|id| universities.get(&id))
                .cloned();
            let ratings = ratings.get(&user.id).copied().unwrap_or_default();

            (user.id, user_to_dto(user, university, ratings))
        })
        .collect())
}

fn user_to_dto(
    user: UserModel,
    university: Option<UniversityModel>,
    ratings: UserRatings,
) -> UserDto {
    UserDto {
        id: user.id,
        name: format!("{} {}", user.first_name, user.last_name),
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        university: university.map(|university| UniversityDto {
            id: university.id,
            name: university.name,
            country: university.country,
            alpha_two_code: university.alpha_two_code,
        }),
        phone_number: user.phone_number,
        date_joined: user.date_joined.and_utc(),
        is_staff: user.is_staff,
        is_active: user.is_active,
        is_verified: user.is_verified,
        stripe_id: user.stripe_id,
        seller_rating: Rating(ratings.seller),
        buyer_rating: Rating(ratings.buyer),
    }
}

/// Check that a phone number is in E.164 format: `+` followed by 8 to 15 digits
pub fn validate_phone_number(phone_number: &str) -> Result<(), UserError> {
    let valid = phone_number
        .strip_prefix('+')
        .is_some_and(|digits| {
            (8..=15).contains(&digits.len())
                && !digits.starts_with('0')
                && digits.chars().all(|c| c.is_ascii_digit())
        });

    if valid {
        Ok(())
    } else {
        Err(UserError::InvalidPhoneNumber)
    }
}

pub(crate) fn validate_name(field: &'static str, value: &str) -> Result<(), UserError> {
    if value.trim().is_empty() {
        return Err(UserError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(UserError::InvalidField {
            field,
            reason: format!("must be at most {} characters", MAX_NAME_LENGTH),
        });
    }

    Ok(())
}

/// Convert a unique constraint violation on a user column into the matching conflict error
pub(crate) fn map_unique_violation(err: DbErr) -> Error {
    if let Some(sea_orm::SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        if message.contains("username") {
            return UserError::UsernameTaken.into();
        }
        if message.contains("email") {
            return UserError::EmailTaken.into();
        }
        if message.contains("phone_number") {
            return UserError::PhoneNumberTaken.into();
        }
    }

    err.into()
}
