//! Tower middleware hosting the chaos engine

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use axum::response::Response;
use tower::{BoxError, Layer, Service};
use shared::ChaosConfig;

use crate::core::ChaosEngine;
use crate::error::ChaosResult;

/// Layer that wraps services in a [`ChaosService`]
#[derive(Clone, Debug)]
pub struct ChaosLayer {
    engine: Arc<ChaosEngine>,
}

impl ChaosLayer {
    pub fn new(engine: ChaosEngine) -> Self {
        Self::from_shared(Arc::new(engine))
    }

    pub fn from_shared(engine: Arc<ChaosEngine>) -> Self {
        Self { engine }
    }

    /// Build the engine from configuration with default collaborators
    pub fn from_config(config: &ChaosConfig) -> ChaosResult<Self> {
        Ok(Self::new(ChaosEngine::from_config(config)?))
    }

    pub fn engine(&self) -> Arc<ChaosEngine> {
        Arc::clone(&self.engine)
    }
}

impl<S> Layer<S> for ChaosLayer {
    type Service = ChaosService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ChaosService {
            inner,
            engine: Arc::clone(&self.engine),
        }
    }
}

/// Middleware service that may inject a fault before the inner service runs.
///
/// Synchronously injected failures are returned as errors, so the stack needs
/// an error handler (e.g. `axum::error_handling::HandleErrorLayer`) above it.
#[derive(Clone, Debug)]
pub struct ChaosService<S> {
    inner: S,
    engine: Arc<ChaosEngine>,
}

impl<S, B> Service<Request<B>> for ChaosService<S>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    B: Send + 'static,
{
    type Response = Response;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let engine = Arc::clone(&self.engine);
        // Hand the readied service to the request and keep a fresh clone.
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move { engine.process(request, inner).await })
    }
}
