//! Request handlers and per-request middleware

pub mod api;
pub mod errors;

pub use api::{RequestStart, health, index, stamp_request_start};
pub use errors::handle_chaos_error;
