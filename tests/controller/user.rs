use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bookmeet::{
    model::user::{CreateUserDto, UpdateUserDto},
    server::{
        controller::user::{get_me, get_user, register, update_me},
        model::app::AppState,
    },
};
use bookmeet_test_utils::prelude::*;

use super::{body_json, sign_in};

fn registration(username: &str, phone_number: Option<&str>) -> CreateUserDto {
    CreateUserDto {
        username: username.to_string(),
        email: format!("{}@school.edu", username),
        password: "correct horse".to_string(),
        first_name: "Bob".to_string(),
        last_name: "Tester".to_string(),
        university: None,
        phone_number: phone_number.map(str::to_string),
    }
}

#[tokio::test]
/// Expect 201 created with an unverified user
async fn registers_user() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();

    let result = register(State(state), Json(registration("bob", Some("+15555550100")))).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["username"], "bob");
    assert_eq!(body["name"], "Bob Tester");
    assert_eq!(body["is_verified"], false);
    assert!(body.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
/// Expect 409 conflict when the username is taken
async fn rejects_duplicate_username() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();
    register(State(state.clone()), Json(registration("bob", None)))
        .await
        .unwrap();

    let mut duplicate = registration("bob", None);
    duplicate.email = "other@school.edu".to_string();
    let result = register(State(state), Json(duplicate)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for a phone number not in E.164 format
async fn rejects_invalid_phone_number() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();

    let result = register(State(state), Json(registration("bob", Some("555-0100")))).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 200 success with rating averages over completed listings
async fn returns_user_with_ratings() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let seller = test.user().insert_user("seller").await?;
    let first = test.listing().insert_listing(seller.id, "Calculus", 2000).await?;
    let second = test.listing().insert_listing(seller.id, "Physics", 3000).await?;
    test.listing()
        .insert_completed_listing(first.id, Some(8), None)
        .await?;
    test.listing()
        .insert_completed_listing(second.id, Some(6), None)
        .await?;
    let state: AppState = test.state();

    let result = get_user(State(state), Path(seller.id)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["seller_rating"], 7.0);
    assert_eq!(body["buyer_rating"], "No Ratings");

    Ok(())
}

#[tokio::test]
/// Expect 404 not found for a user that does not exist
async fn returns_not_found_for_unknown_user() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();

    let result = get_user(State(state), Path(1)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect 401 unauthorized for the current user without a session
async fn get_me_requires_session() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();

    let result = get_me(State(state), test.session.clone()).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect a new phone number to reset verification
async fn update_me_resets_verification() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let user = test.user().insert_user_with_phone("bob").await?;
    sign_in(&test.session, user.id).await;
    let state: AppState = test.state();

    let result = update_me(
        State(state),
        test.session.clone(),
        Json(UpdateUserDto {
            phone_number: Some("+15555550199".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["phone_number"], "+15555550199");
    assert_eq!(body["is_verified"], false);

    Ok(())
}
