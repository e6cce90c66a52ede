//! AdMatch service (v1)
//!
//! Answers "which advertising platforms operate at this location?" for
//! hierarchical paths such as `/ru/svrd/revda`.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /api/advertising/load          GET /api/advertising/search
//!               │                                    │
//!               ▼                                    ▼
//!     ┌──────────────────┐                 ┌──────────────────┐
//!     │   feed parser    │                 │  query checks    │
//!     └────────┬─────────┘                 └────────┬─────────┘
//!              ▼                                    ▼
//!     ┌──────────────────────────────────────────────────────┐
//!     │                  PlatformCatalog                     │
//!     │   validate records → build trie → publish snapshot   │
//!     │   lookup: walk trie, union ancestors, cache result   │
//!     └──────────────────────────────────────────────────────┘
//!              ▲
//!     startup feed / file watcher / POST /admin/reload
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use admatch::config::{load_config, validate_config, ServiceConfig};
use admatch::http::HttpServer;
use admatch::lifecycle::{bootstrap, signals, Shutdown};
use admatch::observability::logging;

#[derive(Parser)]
#[command(name = "admatch")]
#[command(about = "Location-targeted advertising platform lookup service", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `feed.path`.
    #[arg(short, long)]
    feed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(feed) = args.feed {
        config.feed.path = Some(feed);
    }
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("config error: {error}");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    logging::init_tracing(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "admatch starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_upload_bytes = config.feed.max_upload_bytes,
        feed = ?config.feed.path,
        admin = config.admin.enabled,
        "Configuration loaded"
    );

    let services = bootstrap(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    let server = HttpServer::new(config, services.catalog);
    server.run(listener, receiver).await?;

    drop(services.watcher);
    tracing::info!("Shutdown complete");
    Ok(())
}
