//! Test fixture modules for database rows and provider mock endpoints.
//!
//! - `user` - users and universities
//! - `listing` - book listings and completed listings
//! - `meetup` - meetup requests
//! - `payment` - Stripe endpoints, signed webhook payloads and webhook audit rows
//! - `verification` - Twilio Verify endpoints

pub mod listing;
pub mod meetup;
pub mod payment;
pub mod user;
pub mod verification;
