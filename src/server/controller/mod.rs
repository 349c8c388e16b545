//! HTTP controller endpoints for the marketplace API.
//!
//! Axum handlers for accounts, listings, meetup requests, connection fee payments and phone
//! verification. Handlers read the signed in user from the tower-sessions session, call into
//! the service layer and convert results and errors to responses. Every handler carries a
//! utoipa path annotation collected into the OpenAPI document by the router.

pub mod auth;
pub mod listing;
pub mod meetup;
pub mod payment;
pub mod university;
pub mod user;
pub mod util;
pub mod verification;
