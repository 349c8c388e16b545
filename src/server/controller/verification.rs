use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        verification::VerificationCodeDto,
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{auth::AuthError, verification::VerificationError, Error},
        model::{app::AppState, db::UserModel},
        service::verification::VerificationService,
    },
};

pub static VERIFICATION_TAG: &str = "verification";

/// Signed in user, reported as a verification error when nobody is signed in
async fn verification_user(state: &AppState, session: &Session) -> Result<UserModel, Error> {
    match get_user_from_session(state, session).await {
        Err(Error::AuthError(AuthError::UserNotInSession | AuthError::UserNotInDatabase(_))) => {
            Err(VerificationError::NotSignedIn.into())
        }
        result => result,
    }
}

/// Send a verification code to the signed in user's phone number
///
/// # Responses
/// - 200 (Success): Code sent
/// - 400 (Bad Request): Nobody is signed in or the user has no phone number
/// - 500 (Internal Server Error): A database, session or provider error occurred
#[utoipa::path(
    get,
    path = "/api/verification-code/",
    tag = VERIFICATION_TAG,
    responses(
        (status = 200, description = "Verification code sent", body = MessageDto),
        (status = 400, description = "Not signed in or no phone number", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_verification_code(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = verification_user(&state, &session).await?;

    VerificationService::new(&state.db, state.verification_provider.clone())
        .send_code(&user)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Verification code sent.".to_string(),
        }),
    ))
}

/// Check a verification code and mark the signed in user's phone number verified
///
/// # Responses
/// - 200 (Success): Phone number verified
/// - 400 (Bad Request): Nobody is signed in, no phone number or the code was not approved
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    post,
    path = "/api/verification-code/",
    tag = VERIFICATION_TAG,
    request_body = VerificationCodeDto,
    responses(
        (status = 200, description = "Phone number verified", body = MessageDto),
        (status = 400, description = "Could not verify phone number", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_verification_code(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<VerificationCodeDto>,
) -> Result<impl IntoResponse, Error> {
    let user = verification_user(&state, &session).await?;

    VerificationService::new(&state.db, state.verification_provider.clone())
        .check_code(&user, request.code)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Successfully verified phone number!".to_string(),
        }),
    ))
}
