use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        listing::{BookListingDto, BookListingRequestDto, CompletedListingDto, ListingQuery},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::listing::ListingService,
    },
};

pub static LISTING_TAG: &str = "book listing";

/// List book listings
///
/// # Responses
/// - 200 (Success): Listings matching the filters
/// - 400 (Bad Request): Unknown ordering
/// - 500 (Internal Server Error): A database error occurred
#[utoipa::path(
    get,
    path = "/api/book_listings/booklisting/",
    tag = LISTING_TAG,
    params(ListingQuery),
    responses(
        (status = 200, description = "Book listings", body = Vec<BookListingDto>),
        (status = 400, description = "Invalid ordering", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse, Error> {
    let listings = ListingService::new(&state.db).get_listings(query).await?;

    Ok((StatusCode::OK, Json(listings)))
}

/// Create a book listing owned by the signed in user
///
/// # Responses
/// - 201 (Created): The new listing
/// - 400 (Bad Request): Invalid field
/// - 401 (Unauthorized): Nobody is signed in
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    post,
    path = "/api/book_listings/booklisting/",
    tag = LISTING_TAG,
    request_body = BookListingRequestDto,
    responses(
        (status = 201, description = "Listing created", body = BookListingDto),
        (status = 400, description = "Invalid listing", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_listing(
    State(state): State<AppState>,
    session: Session,
    Json(listing): Json<BookListingRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let listing = ListingService::new(&state.db)
        .create_listing(user.id, listing)
        .await?;

    Ok((StatusCode::CREATED, Json(listing)))
}

#[utoipa::path(
    get,
    path = "/api/book_listings/booklisting/{listing_id}/",
    tag = LISTING_TAG,
    params(
        ("listing_id" = i32, Path, description = "Book listing ID")
    ),
    responses(
        (status = 200, description = "Book listing", body = BookListingDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let listing = ListingService::new(&state.db).get_listing(listing_id).await?;

    Ok((StatusCode::OK, Json(listing)))
}

/// Replace a listing of the signed in user
///
/// A `status` in the body moves the listing through `active`, `sold` and `archived`.
///
/// # Responses
/// - 200 (Success): The updated listing
/// - 400 (Bad Request): Invalid field
/// - 401 (Unauthorized): Nobody is signed in
/// - 403 (Forbidden): The listing belongs to another user
/// - 404 (Not Found): No listing with this ID
/// - 409 (Conflict): The status change is not allowed
/// - 500 (Internal Server Error): A database or session error occurred
#[utoipa::path(
    put,
    path = "/api/book_listings/booklisting/{listing_id}/",
    tag = LISTING_TAG,
    params(
        ("listing_id" = i32, Path, description = "Book listing ID")
    ),
    request_body = BookListingRequestDto,
    responses(
        (status = 200, description = "Listing updated", body = BookListingDto),
        (status = 400, description = "Invalid listing", body = ErrorDto),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not the listing owner", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 409, description = "Invalid status transition", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_listing(
    State(state): State<AppState>,
    session: Session,
    Path(listing_id): Path<i32>,
    Json(listing): Json<BookListingRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let listing = ListingService::new(&state.db)
        .update_listing(user.id, listing_id, listing)
        .await?;

    Ok((StatusCode::OK, Json(listing)))
}

#[utoipa::path(
    delete,
    path = "/api/book_listings/booklisting/{listing_id}/",
    tag = LISTING_TAG,
    params(
        ("listing_id" = i32, Path, description = "Book listing ID")
    ),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Authentication required", body = ErrorDto),
        (status = 403, description = "Not the listing owner", body = ErrorDto),
        (status = 404, description = "Listing not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    session: Session,
    Path(listing_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    ListingService::new(&state.db)
        .delete_listing(user.id, listing_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Completed listings of an owner with the ratings given on each
///
/// # Responses
/// - 200 (Success): Completed listings, empty if the owner has sold nothing yet
/// - 404 (Not Found): The owner has no listings
/// - 500 (Internal Server Error): A database error occurred
#[utoipa::path(
    get,
    path = "/api/book_listings/booklisting/ratings-by-owner/{owner_id}/",
    tag = LISTING_TAG,
    params(
        ("owner_id" = i32, Path, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "Completed listings", body = Vec<CompletedListingDto>),
        (status = 404, description = "No listings found for this owner", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ratings_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ratings = ListingService::new(&state.db)
        .get_ratings_by_owner(owner_id)
        .await?;

    Ok((StatusCode::OK, Json(ratings)))
}
