//! Process control backed by the real process primitives

use shared::chaos_error;

use crate::COMPONENT;
use crate::error::{ChaosError, ChaosResult};
use crate::traits::ProcessControl;
use crate::types::SignalName;

/// Exits and signals the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct RealProcessControl;

impl RealProcessControl {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessControl for RealProcessControl {
    fn exit(&self, code: i32) {
        chaos_error!(COMPONENT, exit_code = code, "💀 Terminating process");
        std::process::exit(code)
    }

    #[cfg(unix)]
    fn signal(&self, signal: &SignalName) -> ChaosResult<()> {
        use std::str::FromStr;
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let sig = Signal::from_str(signal.as_str()).map_err(|e| ChaosError::SignalDelivery {
            signal: signal.to_string(),
            message: e.to_string(),
        })?;

        kill(Pid::this(), sig).map_err(|e| ChaosError::SignalDelivery {
            signal: signal.to_string(),
            message: e.to_string(),
        })
    }

    #[cfg(not(unix))]
    fn signal(&self, signal: &SignalName) -> ChaosResult<()> {
        Err(ChaosError::SignalDelivery {
            signal: signal.to_string(),
            message: "signals are not supported on this platform".to_string(),
        })
    }
}
