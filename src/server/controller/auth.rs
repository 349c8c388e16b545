use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{LoginDto, UserDto},
    },
    server::{
        error::{user::UserError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::{auth::AuthService, user::UserService},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Sign in with a username and password
///
/// Starts a session for the user, the session cookie authenticates every following request.
///
/// # Responses
/// - 200 (Success): Signed in, returns the user
/// - 401 (Unauthorized): Unknown username, wrong password or deactivated account
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    post,
    path = "/api/auth/login/",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = UserDto),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(login): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db)
        .login(&login.username, &login.password)
        .await?;

    // New session ID on privilege change
    session.cycle_id().await?;
    SessionUserId::insert(&session, user.id).await?;

    tracing::debug!(user_id = %user.id, "User signed in");

    let user = UserService::new(&state.db)
        .get_user(user.id)
        .await?
        .ok_or(UserError::NotFound(user.id))?;

    Ok((StatusCode::OK, Json(user)))
}

/// Logs the user out by clearing their session
///
/// # Responses
/// - 200 (Success): Logged out, also returned when nobody was signed in
/// - 500 (Internal Server Error): There was an issue clearing the session
#[utoipa::path(
    get,
    path = "/api/auth/logout/",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    let maybe_user_id = SessionUserId::get(&session).await?;

    // Clearing a session without data fails, only clear an actual sign in
    if maybe_user_id.is_some() {
        session.clear().await;
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logged out.".to_string(),
        }),
    ))
}
