//! Service layer for business logic and orchestration.
//!
//! Services implement the marketplace workflows on top of the repositories: accounts and
//! authentication, listings, meetup negotiation, connection fee payments and phone
//! verification. Calls to external providers go through [`retry::RetryContext`].

pub mod auth;
pub mod listing;
pub mod meetup;
pub mod payment;
pub mod retry;
pub mod university;
pub mod user;
pub mod verification;
