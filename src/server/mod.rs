//! Server application core modules.
//!
//! This module contains all server-side functionality of the marketplace: HTTP routing,
//! session authentication, database repositories, business services, the payment webhook
//! reconciliation and the scheduled jobs that retry failed reconciliations.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
