//! Shared helpers for chaos middleware tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use tower::{BoxError, ServiceBuilder};

use chaos::{ChaosEngine, ChaosLayer};

/// Counts how often the protected handler actually ran
#[derive(Clone, Default)]
pub struct HitCounter(Arc<AtomicUsize>);

impl HitCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Render a middleware failure the way an application error handler would
pub async fn handle_error(error: BoxError) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("err: {error}"))
}

/// Router with one handler behind the chaos layer
pub fn build_app(engine: ChaosEngine, hits: HitCounter) -> Router {
    Router::new()
        .route(
            "/",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.hit();
                    "ok"
                }
            }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_error))
                .layer(ChaosLayer::new(engine)),
        )
}

pub fn get_root() -> Request<Body> {
    Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("valid request")
}

pub async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8_lossy(&bytes).into_owned()
}
