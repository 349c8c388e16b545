//! Server application models and type definitions.
//!
//! This module contains the application state shared by handlers, database model type
//! aliases, and the session data structures used for authentication.

pub mod app;
pub mod db;
pub mod session;
