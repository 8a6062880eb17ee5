//! Probabilistic fault injection for HTTP request pipelines
//!
//! A [`ChaosLayer`] sits in a tower/axum service stack. For each request it
//! draws from a [`RandomSource`]; when the draw falls within the configured
//! probability it picks one weighted [`Rule`] and runs its [`ChaosAction`]:
//! an overridden status, a delay, a severed connection, process exit, a
//! signal, or an injected failure on the synchronous or asynchronous path.

pub mod actions;
pub mod core;
pub mod error;
pub mod layer;
pub mod services;
pub mod traits;
pub mod types;

/// Component name attached to every log event from this crate
pub const COMPONENT: &str = "chaos";

// Re-export main types
pub use actions::{ChaosAction, EventKind};
pub use crate::core::{ChaosEngine, ChaosEngineBuilder, Decision, Gate, Rule, RuleSelector};
pub use error::{ChaosError, ChaosResult};
pub use layer::{ChaosLayer, ChaosService};
pub use types::{InjectedFailure, SignalName};

// Re-export trait definitions
pub use traits::{FailureReporter, ProcessControl, RandomSource};

// Re-export service implementations
pub use services::{
    ChannelFailureReporter, LoggingFailureReporter, RealProcessControl,
    SeededRandomSource, SequenceRandomSource, ThreadRandomSource,
};
