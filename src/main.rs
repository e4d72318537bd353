//! Player Record Server
//!
//! A minimal HTTP/1.1 server written directly over TCP sockets.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                PLAYER SERVER                 │
//!                      │                                              │
//!   Client Request     │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ───────────────────┼─▶│   net    │──▶│  http    │──▶│ routing  │  │
//!                      │  │ listener │   │ parser   │   │  table   │  │
//!                      │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                      │                                     ▼        │
//!                      │                               ┌──────────┐   │
//!                      │                               │ handlers │───┼──▶ Record Store
//!                      │                               └────┬─────┘   │
//!   Client Response    │  ┌──────────┐                      │         │
//!   ◀──────────────────┼──│ response │◀─────────────────────┘         │
//!                      │  └──────────┘                                │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! One connection is processed at a time: accept, parse, route, handle,
//! respond, close, then accept again.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use player_server::config::{load_config, ServerConfig, StoreBackend};
use player_server::lifecycle::{signals::shutdown_signal, startup::bootstrap, Shutdown};
use player_server::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "player-server")]
#[command(about = "Minimal HTTP/1.1 server for player records", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the JSON store path.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep players in memory instead of on disk.
    #[arg(long, conflicts_with = "store")]
    memory_store: bool,

    /// Override the HTML page served at `/`.
    #[arg(long)]
    index: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(path) = &self.store {
            config.store.backend = StoreBackend::Json;
            config.store.path = path.clone();
        }
        if self.memory_store {
            config.store.backend = StoreBackend::Memory;
        }
        if let Some(index) = &self.index {
            config.static_files.index_path = index.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("player-server: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ServerConfig::default(),
    };
    args.apply(&mut config);

    if let Err(errors) = player_server::config::validate_config(&config) {
        for e in errors {
            eprintln!("player-server: invalid configuration: {}", e);
        }
        return ExitCode::FAILURE;
    }

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("player-server: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("player-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = ?config.store.backend,
        index = %config.static_files.index_path.display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let (server, listener) = match bootstrap(config).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    if let Err(e) = server.run(listener, server_shutdown).await {
        tracing::error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
