//! Utility functions for controller request handling.
//!
//! Provides the session user lookup shared by every endpoint that requires a signed in user.

pub mod get_user;
