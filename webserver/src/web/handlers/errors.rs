//! Error path for failures raised inside the middleware stack

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tower::BoxError;
use chaos::InjectedFailure;
use shared::chaos_warn;

use crate::COMPONENT;

/// Render a middleware failure as a JSON error response.
///
/// Injected failures get the same treatment as any other error so clients
/// exercise their ordinary failure handling.
pub async fn handle_chaos_error(error: BoxError) -> Response {
    let injected = error.downcast_ref::<InjectedFailure>().is_some();
    chaos_warn!(COMPONENT, error = %error, injected, "❌ Request failed in middleware");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "msg": "err",
            "error": error.to_string(),
        })),
    )
        .into_response()
}
