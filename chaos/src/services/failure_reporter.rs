//! Failure reporters for asynchronously injected failures

use tokio::sync::mpsc;
use shared::chaos_error;

use crate::COMPONENT;
use crate::traits::FailureReporter;
use crate::types::InjectedFailure;

/// Logs each failure from a detached task on the current runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingFailureReporter;

impl LoggingFailureReporter {
    pub fn new() -> Self {
        Self
    }
}

impl FailureReporter for LoggingFailureReporter {
    fn report(&self, failure: InjectedFailure) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    chaos_error!(COMPONENT, error = %failure, "🔥 Unobserved injected failure");
                });
            }
            Err(_) => {
                chaos_error!(COMPONENT, error = %failure, "🔥 Unobserved injected failure");
            }
        }
    }
}

/// Forwards failures to a receiver owned by a supervising task
#[derive(Debug, Clone)]
pub struct ChannelFailureReporter {
    sender: mpsc::UnboundedSender<InjectedFailure>,
}

impl ChannelFailureReporter {
    pub fn new(sender: mpsc::UnboundedSender<InjectedFailure>) -> Self {
        Self { sender }
    }

    /// Create a reporter together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<InjectedFailure>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl FailureReporter for ChannelFailureReporter {
    fn report(&self, failure: InjectedFailure) {
        // With the supervisor gone the failure is still surfaced, via the log.
        if let Err(mpsc::error::SendError(failure)) = self.sender.send(failure) {
            chaos_error!(COMPONENT, error = %failure, "🔥 Injected failure reported after supervisor exit");
        }
    }
}
