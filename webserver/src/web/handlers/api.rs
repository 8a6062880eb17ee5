//! REST API handlers
//!
//! The index endpoint reports when the request entered the stack and when the
//! handler ran, so clients can measure injected delays.

use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{Json, Response},
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

/// Time the request entered the application stack
#[derive(Debug, Clone, Copy)]
pub struct RequestStart(pub DateTime<Utc>);

/// Record the arrival time before any fault injection happens
pub async fn stamp_request_start(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(RequestStart(Utc::now()));
    next.run(request).await
}

/// Application endpoint protected by the chaos layer
pub async fn index(Extension(RequestStart(start)): Extension<RequestStart>) -> Json<Value> {
    Json(json!({
        "msg": "ok",
        "start": start.to_rfc3339(),
        "end": Utc::now().to_rfc3339(),
    }))
}

/// Liveness probe, never subject to fault injection
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
