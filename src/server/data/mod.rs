//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries per domain (users and universities, listings, meetup
//! requests, payments). Each is generic over [`sea_orm::ConnectionTrait`] so it can run
//! either on the pool or inside a transaction.

pub mod listing;
pub mod meetup;
pub mod payment;
pub mod user;
