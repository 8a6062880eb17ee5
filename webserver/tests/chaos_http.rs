//! End-to-end tests: real HTTP requests against the demo server
//!
//! Random draws are scripted so each test knows which rule fires.

mod helpers;

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::{Value, json};

use chaos::{ChaosEngineBuilder, ChannelFailureReporter, SequenceRandomSource};
use shared::{ChaosConfig, RuleConfig};

use helpers::{RecordingProcessControl, TestServer, client};

fn scripted(config: &ChaosConfig, draws: Vec<f64>) -> ChaosEngineBuilder {
    ChaosEngineBuilder::from_config(config)
        .unwrap()
        .random_source(SequenceRandomSource::new(draws))
}

fn single_rule(rule: RuleConfig) -> ChaosConfig {
    ChaosConfig::default().with_probability(1.0).with_rule(rule)
}

#[tokio::test]
async fn test_passthrough_returns_application_response() {
    let engine = scripted(&single_rule(RuleConfig::new("httpStatus")), vec![0.5]).probability(0.1).build().unwrap();
    let server = TestServer::start(engine).await;

    let response = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "ok");
    assert!(body["start"].is_string());
    assert!(body["end"].is_string());

    server.stop().await;
}

#[tokio::test]
async fn test_status_override_over_http() {
    let engine = scripted(&single_rule(RuleConfig::new("httpStatus").with_params(503)), vec![0.0, 0.0])
        .build()
        .unwrap();
    let server = TestServer::start(engine).await;

    let response = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.text().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_scenario_status_then_delay() {
    let config = ChaosConfig::from_json_str(
        &json!({
            "probability": 1,
            "rules": [
                {"event": "httpStatus", "params": 500, "weight": 10},
                {"event": "delay", "params": 3000, "weight": 10}
            ]
        })
        .to_string(),
    )
    .unwrap();
    let engine = scripted(&config, vec![0.0, 0.05, 0.0, 0.55]).build().unwrap();
    let server = TestServer::start(engine).await;
    let client = client();

    let first = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let started = Instant::now();
    let second = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(3000));

    let body: Value = second.json().await.unwrap();
    assert_eq!(body["msg"], "ok");

    server.stop().await;
}

#[tokio::test]
async fn test_close_drops_the_connection() {
    let engine = scripted(&single_rule(RuleConfig::new("close")), vec![0.0, 0.0]).build().unwrap();
    let server = TestServer::start(engine).await;

    let result = async {
        client().get(server.url("/")).send().await?.bytes().await
    }
    .await;
    assert!(result.is_err());

    server.stop().await;
}

#[tokio::test]
async fn test_throw_error_renders_error_page() {
    let engine = scripted(&single_rule(RuleConfig::new("throwError").with_params("boom")), vec![0.0, 0.0])
        .build()
        .unwrap();
    let server = TestServer::start(engine).await;

    let response = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "err");
    assert_eq!(body["error"], "boom");

    server.stop().await;
}

#[tokio::test]
async fn test_reject_reports_and_still_answers() {
    let (reporter, mut failures) = ChannelFailureReporter::channel();
    let engine = scripted(&single_rule(RuleConfig::new("reject").with_params("late boom")), vec![0.0, 0.0])
        .failure_reporter(reporter)
        .build()
        .unwrap();
    let server = TestServer::start(engine).await;

    let response = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let failure = tokio::time::timeout(Duration::from_secs(1), failures.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failure.message(), "late boom");
    assert!(failures.try_recv().is_err());

    server.stop().await;
}

#[tokio::test]
async fn test_exit_is_requested_and_request_continues() {
    let control = RecordingProcessControl::default();
    let engine = scripted(&single_rule(RuleConfig::new("exit").with_params(3)), vec![0.0, 0.0])
        .process_control(control.clone())
        .build()
        .unwrap();
    let server = TestServer::start(engine).await;

    let response = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(control.exits(), vec![3]);

    server.stop().await;
}

#[cfg(unix)]
#[tokio::test]
async fn test_kill_delivers_default_signal() {
    let control = RecordingProcessControl::default();
    let engine = scripted(&single_rule(RuleConfig::new("kill")), vec![0.0, 0.0])
        .process_control(control.clone())
        .build()
        .unwrap();
    let server = TestServer::start(engine).await;

    let response = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(control.signals(), vec!["SIGHUP".to_string()]);

    server.stop().await;
}

#[tokio::test]
async fn test_health_is_outside_the_chaos_layer() {
    let engine = scripted(&single_rule(RuleConfig::new("httpStatus")), vec![0.0, 0.0]).build().unwrap();
    let server = TestServer::start(engine).await;

    let response = client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    server.stop().await;
}
