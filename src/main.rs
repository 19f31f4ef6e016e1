//! Portal router (v1)
//!
//! Serves the portal's single-page application under a history-mode base URL.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  PORTAL ROUTER                    │
//!                      │                                                   │
//!   Browser request    │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ───────────────────┼─▶│  http   │───▶│ history  │───▶│ route table │  │
//!                      │  │ server  │    │ strip    │    │ first match │  │
//!                      │  └─────────┘    │ base     │    └──────┬──────┘  │
//!                      │                 └──────────┘           │         │
//!   Shell + status     │  ┌─────────┐                    ┌──────▼──────┐  │
//!   ◀──────────────────┼──│response │◀───────────────────│   router    │  │
//!                      │  │ shell   │                    │  resolve    │  │
//!                      │  └─────────┘                    └─────────────┘  │
//!                      │                                                   │
//!                      │   config · observability · lifecycle              │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use portal_router::config::load_or_default;
use portal_router::http::HttpServer;
use portal_router::lifecycle::{signals, startup, Shutdown};
use portal_router::observability::logging;

#[derive(Parser)]
#[command(name = "portal-router")]
#[command(about = "History-mode fallback server for the portal", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "PORTAL_ROUTER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;
    logging::init(&config.observability)?;

    tracing::info!("portal-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        history = ?config.history.mode,
        base = %config.history.base,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let router = startup::install_router(&config)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, router)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
