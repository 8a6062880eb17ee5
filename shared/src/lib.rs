//! Shared types for the chaos layer workspace
//!
//! Contains the serialisable configuration model, the shared error type and
//! the tracing helpers used by every crate in the workspace.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;
