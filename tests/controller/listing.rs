use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bookmeet::{
    model::listing::{BookListingRequestDto, ListingQuery, ListingStatusDto},
    server::{
        controller::listing::{
            create_listing, delete_listing, get_listings, get_ratings_by_owner, update_listing,
        },
        model::app::AppState,
    },
};
use bookmeet_test_utils::prelude::*;
use entity::sea_orm_active_enums::ListingStatus;
use rust_decimal::Decimal;

use super::{body_json, sign_in};

fn listing_request(name: &str, price: Decimal) -> BookListingRequestDto {
    BookListingRequestDto {
        name: name.to_string(),
        author: "Cormen".to_string(),
        price,
        edition: 3,
        condition: "Good".to_string(),
        class_number: "CS 201".to_string(),
        professor: String::new(),
        status: None,
    }
}

#[tokio::test]
/// Expect 201 created with the signed in user as owner and a two decimal price
async fn creates_listing() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    sign_in(&test.session, owner.id).await;
    let state: AppState = test.state();

    let result = create_listing(
        State(state),
        test.session.clone(),
        Json(listing_request("Intro to Algorithms", Decimal::new(45, 0))),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["price"], "45.00");
    assert_eq!(body["status"], "active");
    assert_eq!(body["owner"]["id"], owner.id);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for a price with more than two decimal places
async fn rejects_invalid_price() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    sign_in(&test.session, owner.id).await;
    let state: AppState = test.state();

    let result = create_listing(
        State(state),
        test.session.clone(),
        Json(listing_request("Intro to Algorithms", Decimal::new(45001, 3))),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect case-insensitive name filtering and descending price ordering
async fn filters_and_orders_listings() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    test.listing().insert_listing(owner.id, "Linear Algebra", 2000).await?;
    test.listing().insert_listing(owner.id, "Abstract Algebra", 3500).await?;
    test.listing().insert_listing(owner.id, "Organic Chemistry", 5000).await?;
    let state: AppState = test.state();

    let result = get_listings(
        State(state),
        Query(ListingQuery {
            name: Some("ALGEBRA".to_string()),
            ordering: Some("-price".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|listing| listing["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Abstract Algebra", "Linear Algebra"]);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for an unknown ordering
async fn rejects_unknown_ordering() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();

    let result = get_listings(
        State(state),
        Query(ListingQuery {
            ordering: Some("edition".to_string()),
            ..Default::default()
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 403 forbidden when another user updates a listing
async fn update_requires_owner() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    let other = test.user().insert_user("mallory").await?;
    let listing = test.listing().insert_listing(owner.id, "Calculus", 2000).await?;
    sign_in(&test.session, other.id).await;
    let state: AppState = test.state();

    let result = update_listing(
        State(state),
        test.session.clone(),
        Path(listing.id),
        Json(listing_request("Calculus", Decimal::new(1, 0))),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect 409 conflict when reactivating a sold listing
async fn rejects_invalid_status_transition() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    let listing = test
        .listing()
        .insert_listing_with_status(owner.id, "Calculus", 2000, ListingStatus::Sold)
        .await?;
    sign_in(&test.session, owner.id).await;
    let state: AppState = test.state();

    let mut request = listing_request("Calculus", Decimal::new(20, 0));
    request.status = Some(ListingStatusDto::Active);
    let result = update_listing(State(state), test.session.clone(), Path(listing.id), Json(request))
        .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
/// Expect 204 no content when the owner deletes a listing
async fn deletes_listing() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    let listing = test.listing().insert_listing(owner.id, "Calculus", 2000).await?;
    sign_in(&test.session, owner.id).await;
    let state: AppState = test.state();

    let result = delete_listing(State(state), test.session.clone(), Path(listing.id)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for ratings of an owner without listings
async fn ratings_by_owner_without_listings() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    let state: AppState = test.state();

    let result = get_ratings_by_owner(State(state), Path(owner.id)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "No listings found for this owner.");

    Ok(())
}

#[tokio::test]
/// Expect 200 success with the completed listings of an owner
async fn ratings_by_owner() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let owner = test.user().insert_user("alice").await?;
    let sold = test.listing().insert_listing(owner.id, "Calculus", 2000).await?;
    test.listing().insert_listing(owner.id, "Physics", 3000).await?;
    test.listing()
        .insert_completed_listing(sold.id, Some(9), Some(7))
        .await?;
    let state: AppState = test.state();

    let result = get_ratings_by_owner(State(state), Path(owner.id)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let completed = body.as_array().unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["book_listing"]["id"], sold.id);
    assert_eq!(completed[0]["seller_rating"], 9);

    Ok(())
}
