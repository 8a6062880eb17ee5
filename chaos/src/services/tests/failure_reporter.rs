//! Tests for FailureReporter implementations

use std::time::Duration;

use crate::services::failure_reporter::{ChannelFailureReporter, LoggingFailureReporter};
use crate::traits::FailureReporter;
use crate::types::InjectedFailure;

#[tokio::test]
async fn test_channel_reporter_delivers_once() {
    let (reporter, mut receiver) = ChannelFailureReporter::channel();

    reporter.report(InjectedFailure::new("reject"));

    let received = tokio::time::timeout(Duration::from_secs(1), receiver.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received.message(), "reject");
    assert!(receiver.try_recv().is_err());
}

#[tokio::test]
async fn test_channel_reporter_survives_closed_receiver() {
    let (reporter, receiver) = ChannelFailureReporter::channel();
    drop(receiver);

    // Falls back to logging instead of panicking
    reporter.report(InjectedFailure::new("nobody listening"));
}

#[tokio::test]
async fn test_logging_reporter_inside_runtime() {
    let reporter = LoggingFailureReporter::new();
    reporter.report(InjectedFailure::new("logged"));
    tokio::task::yield_now().await;
}

#[test]
fn test_logging_reporter_outside_runtime() {
    let reporter = LoggingFailureReporter::new();
    reporter.report(InjectedFailure::new("logged synchronously"));
}
