//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use chaos::{ChaosEngine, ChaosResult, ProcessControl, SignalName};
use webserver::{WebServer, WebServerResult};

/// Demo server bound to an ephemeral port
pub struct TestServer {
    pub address: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<WebServerResult<()>>,
}

impl TestServer {
    pub async fn start(engine: ChaosEngine) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let (shutdown, signal) = oneshot::channel::<()>();

        let server = WebServer::new(address, engine);
        let handle = tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = signal.await;
                })
                .await
        });

        Self { address, shutdown: Some(shutdown), handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Fresh client per test; aborted connections must not be reused
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

/// Records process-level effects instead of performing them
#[derive(Clone, Default)]
pub struct RecordingProcessControl {
    exits: Arc<Mutex<Vec<i32>>>,
    signals: Arc<Mutex<Vec<String>>>,
}

impl RecordingProcessControl {
    pub fn exits(&self) -> Vec<i32> {
        self.exits.lock().unwrap().clone()
    }

    pub fn signals(&self) -> Vec<String> {
        self.signals.lock().unwrap().clone()
    }
}

impl ProcessControl for RecordingProcessControl {
    fn exit(&self, code: i32) {
        self.exits.lock().unwrap().push(code);
    }

    fn signal(&self, signal: &SignalName) -> ChaosResult<()> {
        self.signals.lock().unwrap().push(signal.to_string());
        Ok(())
    }
}
