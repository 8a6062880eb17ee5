//! WebServer entry point
//!
//! Serves the demo application with the chaos layer configured from a JSON
//! file and command line overrides.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use chaos::{ChaosEngineBuilder, ChannelFailureReporter};
use shared::{chaos_info, logging};

use webserver::{COMPONENT, ChaosSettings, WebServer, WebServerError, WebServerResult, spawn_failure_supervisor};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Demo HTTP service with probabilistic fault injection")]
struct Args {
    /// Port for HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Address to bind on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// JSON chaos configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the activation probability from the config file
    #[arg(long)]
    probability: Option<f64>,

    /// Seed for replayable fault selection
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));
    logging::log_startup(COMPONENT, "chaos demo webserver");

    let http_addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address: {}", e)))?;

    let settings = ChaosSettings {
        config_path: args.config,
        probability: args.probability,
        seed: args.seed,
    };
    let config = settings.resolve()?;

    // Asynchronous failures go to a supervisor instead of vanishing
    let (reporter, failures) = ChannelFailureReporter::channel();
    let supervisor = spawn_failure_supervisor(failures);

    let engine = ChaosEngineBuilder::from_config(&config)?
        .failure_reporter(reporter)
        .build()?;

    chaos_info!(
        COMPONENT,
        "🎲 Chaos layer armed: probability {} with {} rules",
        engine.probability(),
        engine.rules().len()
    );

    let webserver = WebServer::new(http_addr, engine);
    webserver.run().await?;

    // Dropping the server drops the last reporter, which ends the supervisor
    drop(webserver);
    if let Ok(Ok(seen)) = tokio::time::timeout(Duration::from_secs(1), supervisor).await {
        chaos_info!(COMPONENT, "📋 {} asynchronous failures reported", seen);
    }

    logging::log_success(COMPONENT, "WebServer stopped gracefully");
    Ok(())
}
