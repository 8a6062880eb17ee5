//! HTTP surface of the demo server

pub mod handlers;
