use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{CreateUserDto, UpdateUserDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{user::UserError, Error},
        model::app::AppState,
        service::{auth::AuthService, user::UserService},
    },
};

pub static USER_TAG: &str = "user";

/// Register a new account
///
/// The account starts unverified, a phone number can be verified afterwards through the
/// verification code endpoints.
///
/// # Responses
/// - 201 (Created): The new user
/// - 400 (Bad Request): Invalid field or unknown university
/// - 409 (Conflict): Username, email or phone number already in use
/// - 500 (Internal Server Error): A database error occurred
#[utoipa::path(
    post,
    path = "/api/users/",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User registered", body = UserDto),
        (status = 400, description = "Invalid registration", body = ErrorDto),
        (status = 409, description = "Username, email or phone number taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(user): Json<CreateUserDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db).register(user).await?;

    let user = UserService::new(&state.db)
        .get_user(user.id)
        .await?
        .ok_or(UserError::NotFound(user.id))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user with their seller & buyer rating averages
///
/// # Responses
/// - 200 (Success): The user
/// - 404 (Not Found): No user with this ID
/// - 500 (Internal Server Error): A database error occurred
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/",
    tag = USER_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db)
        .get_user(user_id)
        .await?
        .ok_or(UserError::NotFound(user_id))?;

    Ok((StatusCode::OK, Json(user)))
}

/// Get the signed in user
///
/// # Responses
/// - 200 (Success): The signed in user
/// - 401 (Unauthorized): Nobody is signed in
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    get,
    path = "/api/get-me/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Signed in user", body = UserDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let user = UserService::new(&state.db)
        .get_user(user.id)
        .await?
        .ok_or(UserError::NotFound(user.id))?;

    Ok((StatusCode::OK, Json(user)))
}

/// Update the signed in user's profile
///
/// Changing the phone number marks the user unverified.
///
/// # Responses
/// - 200 (Success): The updated user
/// - 400 (Bad Request): Invalid field or unknown university
/// - 401 (Unauthorized): Nobody is signed in
/// - 409 (Conflict): Phone number already in use
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    patch,
    path = "/api/get-me/",
    tag = USER_TAG,
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid profile update", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 409, description = "Phone number taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let user = UserService::new(&state.db)
        .update_user(user.id, update)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
