//! Authentication service layer.
//!
//! Registration and password login. Passwords are stored as argon2id PHC strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;

use crate::{
    model::user::CreateUserDto,
    server::{
        data::user::{university::UniversityRepository, UserRepository},
        error::{auth::AuthError, user::UserError, Error},
        model::db::UserModel,
        service::user::{map_unique_violation, validate_name, validate_phone_number},
    },
};

const MAX_USERNAME_LENGTH: usize = 32;
const MAX_EMAIL_LENGTH: usize = 255;
const MIN_PASSWORD_LENGTH: usize = 8;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new, unverified user
    ///
    /// # Returns
    /// - `Ok(UserModel)` - The created user
    /// - `Err(Error::UserError)` - Invalid field, unknown university, or username, email or
    ///   phone number already in use
    pub async fn register(&self, user: CreateUserDto) -> Result<UserModel, Error> {
        validate_username(&user.username)?;
        validate_email(&user.email)?;
        validate_name("first_name", &user.first_name)?;
        validate_name("last_name", &user.last_name)?;
        if user.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::InvalidField {
                field: "password",
                reason: format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            }
            .into());
        }
        if let Some(phone_number) = &user.phone_number {
            validate_phone_number(phone_number)?;
        }
        if let Some(university_id) = user.university {
            if UniversityRepository::new(self.db)
                .get(university_id)
                .await?
                .is_none()
            {
                return Err(UserError::UniversityNotFound(university_id).into());
            }
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_username(&user.username).await?.is_some() {
            return Err(UserError::UsernameTaken.into());
        }
        if user_repo.find_by_email(&user.email).await?.is_some() {
            return Err(UserError::EmailTaken.into());
        }
        if let Some(phone_number) = &user.phone_number {
            if user_repo.find_by_phone_number(phone_number).await?.is_some() {
                return Err(UserError::PhoneNumberTaken.into());
            }
        }

        let password_hash = hash_password(&user.password)?;

        // Concurrent registrations with the same values are caught by the unique constraints
        let user = user_repo
            .create(user, password_hash)
            .await
            .map_err(map_unique_violation)?;

        tracing::info!(user_id = %user.id, "Registered new user");

        Ok(user)
    }

    /// Check a username and password
    ///
    /// # Returns
    /// - `Ok(UserModel)` - The authenticated user
    /// - `Err(Error::AuthError(AuthError::InvalidCredentials))` - Unknown user or wrong password
    /// - `Err(Error::AuthError(AuthError::InactiveUser))` - The account has been deactivated
    pub async fn login(&self, username: &str, password: &str) -> Result<UserModel, Error> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_username(username)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active {
            return Err(AuthError::InactiveUser(user.id).into());
        }

        Ok(user)
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Whether `password` matches the stored PHC string, unparseable hashes never match
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn validate_username(username: &str) -> Result<(), UserError> {
    let valid_chars = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));

    if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH || !valid_chars {
        return Err(UserError::InvalidField {
            field: "username",
            reason: format!(
                "must be 1 to {} letters, digits or @/./+/-/_",
                MAX_USERNAME_LENGTH
            ),
        });
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), UserError> {
    let valid = email.len() <= MAX_EMAIL_LENGTH
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if !valid {
        return Err(UserError::InvalidField {
            field: "email",
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::model::user::CreateUserDto;

    pub(super) fn registration(username: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            email: format!("{}@school.edu", username),
            password: "correct horse battery staple".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            university: None,
            phone_number: Some("+15555550123".to_string()),
        }
    }

    mod password {
        use crate::server::service::auth::{hash_password, verify_password};

        /// Expect a hashed password to verify and a different password not to
        #[test]
        fn hashes_and_verifies() {
            let hash = hash_password("correct horse").unwrap();

            assert!(hash.starts_with("$argon2id$"));
            assert!(verify_password("correct horse", &hash));
            assert!(!verify_password("wrong horse", &hash));
        }

        /// Expect a malformed stored hash never to match
        #[test]
        fn rejects_unparseable_hash() {
            assert!(!verify_password("anything", "unusable"));
        }
    }

    mod register {
        use bookmeet_test_utils::prelude::*;

        use super::registration;
        use crate::server::{
            error::{user::UserError, Error},
            service::auth::AuthService,
        };

        /// Expect the user to be created unverified with a hashed password
        #[tokio::test]
        async fn registers_user() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;

            let result = AuthService::new(&test.state.db)
                .register(registration("ada"))
                .await;

            assert!(result.is_ok());
            let user = result.unwrap();
            assert!(!user.is_verified);
            assert_ne!(user.password_hash, "correct horse battery staple");

            Ok(())
        }

        /// Expect Conflict errors for a reused username or email
        #[tokio::test]
        async fn fails_for_taken_username_and_email() -> Result<(), TestError> {
            let mut test = test_setup_with_marketplace_tables!()?;
            test.user().insert_user("ada").await?;

            let service = AuthService::new(&test.state.db);
            let taken_username = service.register(registration("ada")).await;

            let mut taken_email = registration("ada2");
            taken_email.email = "ada@school.edu".to_string();
            let taken_email = service.register(taken_email).await;

            assert!(matches!(
                taken_username,
                Err(Error::UserError(UserError::UsernameTaken))
            ));
            assert!(matches!(
                taken_email,
                Err(Error::UserError(UserError::EmailTaken))
            ));

            Ok(())
        }

        /// Expect Error for a phone number not in E.164 format
        #[tokio::test]
        async fn fails_for_invalid_phone_number() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;

            let mut user = registration("ada");
            user.phone_number = Some("555-0100".to_string());
            let result = AuthService::new(&test.state.db).register(user).await;

            assert!(matches!(
                result,
                Err(Error::UserError(UserError::InvalidPhoneNumber))
            ));

            Ok(())
        }
    }

    mod login {
        use bookmeet_test_utils::prelude::*;

        use super::registration;
        use crate::server::{
            error::{auth::AuthError, Error},
            service::auth::AuthService,
        };

        /// Expect the registered user to log in with the right password only
        #[tokio::test]
        async fn checks_password() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let service = AuthService::new(&test.state.db);
            let user = service.register(registration("ada")).await.unwrap();

            let ok = service.login("ada", "correct horse battery staple").await;
            let wrong = service.login("ada", "incorrect").await;
            let unknown = service.login("bob", "correct horse battery staple").await;

            assert_eq!(ok.unwrap().id, user.id);
            assert!(matches!(
                wrong,
                Err(Error::AuthError(AuthError::InvalidCredentials))
            ));
            assert!(matches!(
                unknown,
                Err(Error::AuthError(AuthError::InvalidCredentials))
            ));

            Ok(())
        }
    }
}
