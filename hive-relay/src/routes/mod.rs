//! HTTP and websocket route handlers

pub mod socket;
pub mod status;
