use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bookmeet::{
    model::{
        listing::BookListingRequestDto,
        meetup::{AcceptMeetupRequestDto, CreateMeetupRequestDto, LocationDto},
    },
    server::{
        controller::{
            listing::create_listing,
            meetup::{accept_meetup_request, get_my_meetup_requests, request_meetup},
        },
        model::app::AppState,
    },
};
use bookmeet_test_utils::prelude::*;
use rust_decimal::Decimal;

use super::{body_json, sign_in};

#[tokio::test]
/// Expect a listed book to be requested and accepted by its owner only
async fn list_request_accept_flow() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let carol = test.user().insert_user("carol").await?;
    let state: AppState = test.state();

    sign_in(&test.session, alice.id).await;
    let resp = create_listing(
        State(state.clone()),
        test.session.clone(),
        Json(BookListingRequestDto {
            name: "Intro to Algorithms".to_string(),
            author: "Cormen".to_string(),
            price: Decimal::new(4500, 2),
            edition: 3,
            condition: "Good".to_string(),
            class_number: "CS 201".to_string(),
            professor: String::new(),
            status: None,
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let listing = body_json(resp).await;
    assert_eq!(listing["price"], "45.00");
    let listing_id = listing["id"].as_i64().unwrap() as i32;

    sign_in(&test.session, bob.id).await;
    let resp = request_meetup(
        State(state.clone()),
        test.session.clone(),
        Json(CreateMeetupRequestDto {
            book_id: Some(listing_id),
            location: Some(LocationDto {
                latitude: Decimal::new(407128004, 7),
                longitude: Decimal::new(-74_006, 3),
            }),
            meetup_time: None,
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let meetup_request = body_json(resp).await;
    assert_eq!(meetup_request["status"], "pending");
    assert_eq!(meetup_request["user"]["id"], bob.id);
    assert_eq!(meetup_request["location_latitude"], "40.712800");
    let meetup_request_id = meetup_request["id"].as_i64().unwrap() as i32;

    sign_in(&test.session, alice.id).await;
    let resp = accept_meetup_request(
        State(state.clone()),
        test.session.clone(),
        Json(AcceptMeetupRequestDto {
            meetup_request_id: Some(meetup_request_id),
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "accepted");

    sign_in(&test.session, carol.id).await;
    let result = accept_meetup_request(
        State(state),
        test.session.clone(),
        Json(AcceptMeetupRequestDto {
            meetup_request_id: Some(meetup_request_id),
        }),
    )
    .await;
    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(resp).await["error"],
        "You do not have permission to accept this request"
    );

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request without a book ID
async fn request_requires_book_id() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let bob = test.user().insert_user("bob").await?;
    sign_in(&test.session, bob.id).await;
    let state: AppState = test.state();

    let result = request_meetup(
        State(state),
        test.session.clone(),
        Json(CreateMeetupRequestDto {
            book_id: None,
            location: None,
            meetup_time: None,
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "bookId is required");

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for a location too large to store
async fn request_out_of_range_location() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let listing = test.listing().insert_listing(alice.id, "Calculus", 2000).await?;
    sign_in(&test.session, bob.id).await;
    let state: AppState = test.state();

    let result = request_meetup(
        State(state),
        test.session.clone(),
        Json(CreateMeetupRequestDto {
            book_id: Some(listing.id),
            location: Some(LocationDto {
                latitude: Decimal::MAX,
                longitude: Decimal::ZERO,
            }),
            meetup_time: None,
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for a listing that does not exist
async fn request_unknown_listing() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let bob = test.user().insert_user("bob").await?;
    sign_in(&test.session, bob.id).await;
    let state: AppState = test.state();

    let result = request_meetup(
        State(state),
        test.session.clone(),
        Json(CreateMeetupRequestDto {
            book_id: Some(404),
            location: None,
            meetup_time: None,
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect the requester and the owner to each see a pending request once
async fn my_requests_partitions_pending() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let listing = test.listing().insert_listing(alice.id, "Calculus", 2000).await?;
    test.meetup()
        .insert_meetup_request(
            bob.id,
            listing.id,
            entity::sea_orm_active_enums::MeetupStatus::Pending,
        )
        .await?;
    let state: AppState = test.state();

    sign_in(&test.session, bob.id).await;
    let resp = get_my_meetup_requests(State(state.clone()), test.session.clone())
        .await
        .unwrap()
        .into_response();
    let body = body_json(resp).await;
    assert_eq!(body["user_created"].as_array().unwrap().len(), 1);
    assert!(body["for_users_books"].as_array().unwrap().is_empty());

    sign_in(&test.session, alice.id).await;
    let resp = get_my_meetup_requests(State(state), test.session.clone())
        .await
        .unwrap()
        .into_response();
    let body = body_json(resp).await;
    assert!(body["user_created"].as_array().unwrap().is_empty());
    assert_eq!(body["for_users_books"].as_array().unwrap().len(), 1);
    assert!(body["scheduled_meetups"].as_array().unwrap().is_empty());

    Ok(())
}
