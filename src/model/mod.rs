//! Request and response types of the HTTP API.

pub mod api;
pub mod listing;
pub mod meetup;
pub mod payment;
pub mod user;
pub mod verification;
