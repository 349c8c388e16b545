//! Requests through the full router with a memory session store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bookmeet::server::{model::app::AppState, router::routes};
use bookmeet_test_utils::prelude::*;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

fn app(test: &TestSetup) -> Router {
    let state: AppState = test.state();

    routes()
        .with_state(state)
        .layer(SessionManagerLayer::new(MemoryStore::default()))
}

#[tokio::test]
/// Expect the universities to be listed by name
async fn lists_universities() -> Result<(), TestError> {
    let mut test = test_setup_with_marketplace_tables!()?;
    test.user().insert_university("Stanford University").await?;
    test.user().insert_university("Boston University").await?;

    let resp = app(&test)
        .oneshot(
            Request::get("/api/universities/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body[0]["name"], "Boston University");
    assert_eq!(body[1]["name"], "Stanford University");

    Ok(())
}

#[tokio::test]
/// Expect 401 unauthorized for the current user without a session cookie
async fn get_me_without_cookie() -> Result<(), TestError> {
    let test = test_setup_with_marketplace_tables!()?;

    let resp = app(&test)
        .oneshot(Request::get("/api/get-me/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect the OpenAPI document to be served
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let resp = app(&test)
        .oneshot(
            Request::get("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
