//! Chaos layer error types

use thiserror::Error;
use shared::SharedError;

/// Result type for chaos layer operations
pub type ChaosResult<T> = Result<T, ChaosError>;

/// Errors raised while building or driving the chaos layer.
///
/// Everything except `SignalDelivery` is raised at construction time.
#[derive(Error, Debug)]
pub enum ChaosError {
    #[error("Unknown chaos event: {event}")]
    UnknownEvent { event: String },

    #[error("Invalid params for {event}: {message}")]
    InvalidParams { event: String, message: String },

    #[error("Invalid weight for {event}: {weight}")]
    InvalidWeight { event: String, weight: f64 },

    #[error("Failed to deliver {signal}: {message}")]
    SignalDelivery { signal: String, message: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}

impl ChaosError {
    pub(crate) fn invalid_params(event: &str, message: impl Into<String>) -> Self {
        ChaosError::InvalidParams {
            event: event.to_string(),
            message: message.into(),
        }
    }
}
