//! Collaborator trait definitions for dependency injection
//!
//! Randomness and every process-wide side effect go through these traits so
//! tests can script draws and observe effects without touching the process.

use crate::error::ChaosResult;
use crate::types::{InjectedFailure, SignalName};

/// Source of uniformly distributed draws in [0, 1)
#[mockall::automock]
pub trait RandomSource: Send + Sync {
    /// Draw the next value
    fn next_f64(&self) -> f64;
}

/// Narrow interface over process-level primitives
#[mockall::automock]
pub trait ProcessControl: Send + Sync {
    /// Request termination of the current process
    fn exit(&self, code: i32);

    /// Deliver a signal to the current process
    fn signal(&self, signal: &SignalName) -> ChaosResult<()>;
}

/// Channel for failures that must not travel on the request's own path
#[mockall::automock]
pub trait FailureReporter: Send + Sync {
    /// Report a failure without blocking the caller
    fn report(&self, failure: InjectedFailure);
}
