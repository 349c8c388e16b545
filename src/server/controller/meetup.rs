use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        meetup::{
            AcceptMeetupRequestDto, CreateMeetupRequestDto, MeetupRequestDto, MyMeetupRequestsDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::meetup::MeetupService,
    },
};

pub static MEETUP_TAG: &str = "meetup";

/// Request a meetup with the owner of a listing
///
/// # Responses
/// - 201 (Created): The new, pending meetup request
/// - 400 (Bad Request): `bookId` missing or invalid location
/// - 401 (Unauthorized): Nobody is signed in
/// - 404 (Not Found): The listing does not exist
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    post,
    path = "/api/book_listings/request-meetup/",
    tag = MEETUP_TAG,
    request_body = CreateMeetupRequestDto,
    responses(
        (status = 201, description = "Meetup requested", body = MeetupRequestDto),
        (status = 400, description = "Invalid meetup request", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 404, description = "BookListing does not exist", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_meetup(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreateMeetupRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let meetup_request = MeetupService::new(&state.db)
        .create_request(user.id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(meetup_request)))
}

/// Accept a meetup request on one of the signed in user's listings
///
/// Accepting an already accepted request succeeds without changes.
///
/// # Responses
/// - 200 (Success): The accepted meetup request
/// - 400 (Bad Request): `meetupRequestId` missing
/// - 401 (Unauthorized): Nobody is signed in
/// - 403 (Forbidden): The listing belongs to another user
/// - 404 (Not Found): The meetup request does not exist
/// - 409 (Conflict): The meetup request was rejected
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    post,
    path = "/api/book_listings/accept-meetup-request/",
    tag = MEETUP_TAG,
    request_body = AcceptMeetupRequestDto,
    responses(
        (status = 200, description = "Meetup request accepted", body = MeetupRequestDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not the listing owner", body = ErrorDto),
        (status = 404, description = "MeetupRequest does not exist", body = ErrorDto),
        (status = 409, description = "Meetup request cannot be accepted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_meetup_request(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AcceptMeetupRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let meetup_request = MeetupService::new(&state.db)
        .accept_request(user.id, request)
        .await?;

    Ok((StatusCode::OK, Json(meetup_request)))
}

/// Meetup requests the signed in user takes part in
///
/// # Responses
/// - 200 (Success): Pending requests made by the user, pending requests on the user's
///   listings and accepted meetups
/// - 401 (Unauthorized): Nobody is signed in
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    get,
    path = "/api/book_listings/my-meetup-requests/",
    tag = MEETUP_TAG,
    responses(
        (status = 200, description = "Meetup requests of the user", body = MyMeetupRequestsDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_meetup_requests(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let requests = MeetupService::new(&state.db)
        .get_my_requests(user.id)
        .await?;

    Ok((StatusCode::OK, Json(requests)))
}
