use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bookmeet::{
    model::verification::VerificationCodeDto,
    server::{
        controller::verification::{check_verification_code, send_verification_code},
        data::user::UserRepository,
        model::app::AppState,
    },
};
use bookmeet_test_utils::prelude::*;

use super::{body_json, sign_in};

#[tokio::test]
/// Expect 400 bad request when nobody is signed in
async fn requires_signed_in_user() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();

    let result = send_verification_code(State(state), test.session.clone()).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Must be a signed in user.");

    Ok(())
}

#[tokio::test]
/// Expect 200 success once a code has been sent
async fn sends_verification_code() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let user = test.user().insert_user_with_phone("alice").await?;
    let endpoint = test.verification().create_send_endpoint(1).await;
    sign_in(&test.session, user.id).await;
    let state: AppState = test.state();

    let result = send_verification_code(State(state), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Verification code sent.");
    endpoint.assert_async().await;

    Ok(())
}

#[tokio::test]
/// Expect 400 bad request for a user without a phone number
async fn send_requires_phone_number() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let user = test.user().insert_user("alice").await?;
    sign_in(&test.session, user.id).await;
    let state: AppState = test.state();

    let result = send_verification_code(State(state), test.session.clone()).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "User must have a phone number."
    );

    Ok(())
}

#[tokio::test]
/// Expect a correct code to verify the signed in user
async fn verifies_correct_code() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let user = test.user().insert_user_with_phone("alice").await?;
    let endpoint = test.verification().create_check_endpoint("approved", 1).await;
    sign_in(&test.session, user.id).await;
    let state: AppState = test.state();

    let result = check_verification_code(
        State(state),
        test.session.clone(),
        Json(VerificationCodeDto { code: 123456 }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["message"],
        "Successfully verified phone number!"
    );
    let stored = UserRepository::new(&test.state.db)
        .get(user.id)
        .await?
        .unwrap();
    assert!(stored.is_verified);
    endpoint.assert_async().await;

    Ok(())
}

#[tokio::test]
/// Expect an incorrect code to leave the user unverified
async fn rejects_incorrect_code() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    let user = test.user().insert_user_with_phone("alice").await?;
    let endpoint = test.verification().create_check_endpoint("pending", 1).await;
    sign_in(&test.session, user.id).await;
    let state: AppState = test.state();

    let result = check_verification_code(
        State(state),
        test.session.clone(),
        Json(VerificationCodeDto { code: 654321 }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "Could not verify phone number, please try again."
    );
    let stored = UserRepository::new(&test.state.db)
        .get(user.id)
        .await?
        .unwrap();
    assert!(!stored.is_verified);
    endpoint.assert_async().await;

    Ok(())
}
