//! Value types carried by chaos actions

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::{ChaosError, ChaosResult};

/// Error value raised or reported by the failure-injecting actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InjectedFailure {
    message: String,
}

impl InjectedFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Build from a rule parameter: a string, or an object with a `message`
    pub(crate) fn from_param(event: &str, param: Option<&Value>) -> ChaosResult<Self> {
        match param {
            Some(Value::String(message)) => Ok(Self::new(message.clone())),
            Some(Value::Object(fields)) => fields
                .get("message")
                .and_then(Value::as_str)
                .map(Self::new)
                .ok_or_else(|| ChaosError::invalid_params(event, "error object needs a string `message`")),
            Some(other) => Err(ChaosError::invalid_params(
                event,
                format!("expected an error message, got {other}"),
            )),
            None => Err(ChaosError::invalid_params(event, "an error value is required")),
        }
    }
}

/// Name of a signal that can be delivered to the current process.
///
/// Stored in canonical `SIGXXX` form and checked against the platform's
/// signal table when parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignalName(String);

impl SignalName {
    pub fn parse(raw: &str) -> ChaosResult<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        let canonical = if upper.starts_with("SIG") {
            upper
        } else {
            format!("SIG{upper}")
        };

        Self::check_supported(&canonical)?;
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(unix)]
    fn check_supported(canonical: &str) -> ChaosResult<()> {
        use std::str::FromStr;

        nix::sys::signal::Signal::from_str(canonical)
            .map(|_| ())
            .map_err(|_| ChaosError::invalid_params("kill", format!("unknown signal {canonical}")))
    }

    #[cfg(not(unix))]
    fn check_supported(canonical: &str) -> ChaosResult<()> {
        Err(ChaosError::invalid_params(
            "kill",
            format!("{canonical} cannot be delivered on this platform"),
        ))
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
