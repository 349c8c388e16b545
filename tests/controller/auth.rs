use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bookmeet::{
    model::user::{CreateUserDto, LoginDto},
    server::{
        controller::auth::{login, logout},
        model::{app::AppState, session::user::SessionUserId},
        service::auth::AuthService,
    },
};
use bookmeet_test_utils::prelude::*;

use super::{body_json, sign_in};

fn registration(username: &str, password: &str) -> CreateUserDto {
    CreateUserDto {
        username: username.to_string(),
        email: format!("{}@school.edu", username),
        password: password.to_string(),
        first_name: "Alice".to_string(),
        last_name: "Tester".to_string(),
        university: None,
        phone_number: None,
    }
}

#[tokio::test]
/// Expect 200 success and the user ID in session after signing in
async fn signs_in_with_valid_credentials() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();
    let user = AuthService::new(&state.db)
        .register(registration("alice", "correct horse"))
        .await
        .unwrap();

    let result = login(
        State(state),
        test.session.clone(),
        Json(LoginDto {
            username: "alice".to_string(),
            password: "correct horse".to_string(),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["seller_rating"], "No Ratings");
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));

    Ok(())
}

#[tokio::test]
/// Expect 401 unauthorized for a wrong password without a session being started
async fn rejects_wrong_password() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;
    let state: AppState = test.state();
    AuthService::new(&state.db)
        .register(registration("alice", "correct horse"))
        .await
        .unwrap();

    let result = login(
        State(state),
        test.session.clone(),
        Json(LoginDto {
            username: "alice".to_string(),
            password: "battery staple".to_string(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect 200 success and the session cleared after logout
async fn logs_out_signed_in_user() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    sign_in(&test.session, 1).await;

    let result = logout(test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect 200 success on logout even without a session
async fn logs_out_without_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = logout(test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
