//! File gateway binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ routing ──┬──▶ /sw.js, /static  ──▶ render / assets
//!                     (timeout,                 ├──▶ /api             ──▶ api dispatcher ──▶ handlers
//!                      request id,              ├──▶ /preview         ──▶ static generator
//!                      tracing)                 ├──▶ /share/          ──▶ share resolver
//!                                               └──▶ anything else    ──▶ UI shell
//!
//!     Cross-cutting: config (+ hot reload), security (auth, headers),
//!                    observability (logs, metrics), lifecycle (shutdown)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use filegate::api::DefaultHandlers;
use filegate::config::watcher::ConfigWatcher;
use filegate::config::{load_config, GatewayConfig};
use filegate::lifecycle::{signals, Shutdown};
use filegate::observability::{logging, metrics};
use filegate::render::assets::DirAssets;
use filegate::security::TokenAuthenticator;
use filegate::share::MemoryShareStore;
use filegate::{HttpServer, Services};

#[derive(Parser, Debug)]
#[command(name = "filegate", version, about = "Web file manager gateway")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("filegate v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.server.base_url,
        assets_dir = ?config.server.assets_dir,
        users = config.users.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shares = Arc::new(match &config.server.shares_file {
        Some(path) => MemoryShareStore::load_from_file(path)?,
        None => MemoryShareStore::new(None),
    });
    tracing::info!(count = shares.count(), "Share store ready");

    let services = Services::new(
        Arc::new(DirAssets::new(config.server.assets_dir.clone())),
        shares.clone(),
        Arc::new(TokenAuthenticator::from_config(&config.users)),
        Arc::new(DefaultHandlers),
    );

    // Without a config file there is nothing to watch; the sender side is
    // simply dropped and the server keeps its initial configuration.
    let (config_updates, _watcher) = match &cli.config {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            match watcher.run() {
                Ok(handle) => (rx, Some(handle)),
                Err(e) => {
                    tracing::warn!(error = %e, "Config hot reload disabled");
                    (rx, None)
                }
            }
        }
        None => (tokio::sync::mpsc::unbounded_channel().1, None),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::watch(shutdown.clone()));

    let server = HttpServer::new(config, services);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    if let Err(e) = shares.save_to_file() {
        tracing::error!(error = %e, "Failed to persist share links");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
