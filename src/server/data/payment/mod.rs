pub mod connection_fee;
pub mod webhook_event;
