//! CEP Gateway
//!
//! Answers `GET /lookup/{cep}` with whichever upstream postal-code service
//! responds first.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────────┐
//!                        │                     CEP GATEWAY                       │
//!                        │                                                      │
//!   GET /lookup/{cep}    │  ┌─────────┐    ┌────────────┐    ┌──────────────┐   │
//!   ─────────────────────┼─▶│  http   │───▶│ LookupKey  │───▶│    race      │   │
//!                        │  │ server  │    │ (400 if    │    │ coordinator  │   │
//!                        │  └─────────┘    │  malformed)│    └──────┬───────┘   │
//!                        │                 └────────────┘           │ fan-out   │
//!                        │                                ┌─────────┴────────┐  │
//!                        │                                ▼                  ▼  │
//!                        │                         ┌────────────┐   ┌──────────┐│     BrasilAPI
//!                        │                         │ provider A │   │provider B││◀──▶ ViaCEP
//!                        │                         └─────┬──────┘   └────┬─────┘│
//!                        │                               └──normalize───┘      │
//!   200 {source, data}   │  ┌──────────┐                       │               │
//!   ◀────────────────────┼──│ response │◀──── first Envelope ──┘               │
//!   504 Timeout!         │  └──────────┘      or deadline                      │
//!                        └──────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use cep_gateway::config::{load_config, ConfigWatcher, GatewayConfig};
use cep_gateway::observability::{logging, metrics};
use cep_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cep-gateway")]
#[command(about = "Races CEP lookups across upstream providers", long_about = None)]
struct Cli {
    /// TOML configuration file; watched for changes when given.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("cep-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        deadline_ms = config.race.deadline_ms,
        request_timeout_secs = config.timeouts.request_secs,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    // Hot reload only applies when a file was given; keep the handle alive.
    let (_watcher, config_updates) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_tx, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
