//! Main webserver implementation
//!
//! Wires the chaos layer into an axum router and serves it.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    middleware,
    routing::get,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use chaos::{ChaosEngine, ChaosLayer, InjectedFailure};
use shared::{chaos_error, chaos_info, logging};

use crate::COMPONENT;
use crate::error::{WebServerError, WebServerResult};
use crate::web::handlers::{handle_chaos_error, health, index, stamp_request_start};

/// Demo webserver with the chaos layer in front of its application routes
#[derive(Clone, Debug)]
pub struct WebServer {
    bind_address: SocketAddr,
    chaos: ChaosLayer,
}

impl WebServer {
    pub fn new(bind_address: SocketAddr, engine: ChaosEngine) -> Self {
        Self::with_layer(bind_address, ChaosLayer::new(engine))
    }

    pub fn with_layer(bind_address: SocketAddr, chaos: ChaosLayer) -> Self {
        Self { bind_address, chaos }
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Application routes, subject to fault injection
            .route("/", get(index))
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_chaos_error))
                    .layer(self.chaos.clone())
                    .into_inner(),
            )
            .layer(middleware::from_fn(stamp_request_start))

            // Health check stays outside the chaos layer
            .route("/health", get(health))

            .layer(TraceLayer::new_for_http())
    }

    /// Bind to the configured address and serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let listener = TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {}: {}", self.bind_address, e)))?;

        self.serve(listener, async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => logging::log_shutdown(COMPONENT, "Received Ctrl+C signal"),
                Err(e) => logging::log_error(COMPONENT, "Signal handling", &e),
            }
        })
        .await
    }

    /// Serve on an already bound listener until `shutdown` completes
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        chaos_info!(
            COMPONENT,
            probability = self.chaos.engine().probability(),
            rules = self.chaos.engine().rules().len(),
            "🌐 Web server listening on http://{}",
            local_addr
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

/// Drain asynchronously injected failures, logging each one.
///
/// Resolves with the number of failures seen once every reporter is dropped.
pub fn spawn_failure_supervisor(mut failures: mpsc::UnboundedReceiver<InjectedFailure>) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut seen = 0;
        while let Some(failure) = failures.recv().await {
            seen += 1;
            chaos_error!(COMPONENT, error = %failure, seen, "🔥 Asynchronous injected failure");
        }
        seen
    })
}
