//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors, the way the router would call them,
//! covering the marketplace flows end to end over an in-memory database and mocked providers.

mod auth;
mod listing;
mod meetup;
mod payment;
mod user;
mod verification;

use axum::response::Response;
use bookmeet::server::model::session::user::SessionUserId;
use http_body_util::BodyExt;
use tower_sessions::Session;

/// Read a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    serde_json::from_slice(&bytes).unwrap()
}

/// Act as `user_id` for the following requests using `session`
pub async fn sign_in(session: &Session, user_id: i32) {
    SessionUserId::insert(session, user_id).await.unwrap();
}
