//! Demo HTTP service hosting the chaos layer
//!
//! Serves a small JSON endpoint behind [`chaos::ChaosLayer`] so operators can
//! point clients, proxies and orchestrators at it and watch how they cope.

pub mod config;
pub mod error;
pub mod web;
pub mod webserver_impl;

/// Component name attached to every log event from this crate
pub const COMPONENT: &str = "webserver";

// Re-export main types
pub use config::ChaosSettings;
pub use error::{WebServerError, WebServerResult};
pub use webserver_impl::{WebServer, spawn_failure_supervisor};
