//! haven - personal wellness journal server
//!
//! Serves the JSON API for mood check-ins, journaling, breathing sessions,
//! hobbies, progress stats and activity suggestions.

use anyhow::{Context, Result};
use clap::Parser;
use haven::{bootstrap, build_router, AppState};
use haven_core::config::StorageBackend;
use haven_core::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "haven")]
#[command(about = "Personal wellness journal server")]
#[command(version)]
struct Args {
    /// Config file (defaults to $XDG_CONFIG_HOME/haven/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(short, long)]
    bind: Option<String>,

    /// Storage backend: sqlite or memory
    #[arg(long)]
    backend: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match args.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(backend) = args.backend {
        config.storage.backend = backend;
    }
    config.validate().context("invalid configuration")?;

    // Initialize logging
    let _log_guard =
        haven_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let store = bootstrap::open_store(&config)?;
    if config.server.seed_demo_user {
        bootstrap::seed_demo_user(store.as_ref())?;
    }
    let engine = bootstrap::load_engine(&config)?;

    let app = build_router(AppState::new(store, engine), config.server.cors_permissive);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    tracing::info!(
        addr = %config.server.bind,
        backend = config.storage.backend.as_str(),
        "Server listening"
    );
    println!("haven listening on http://{}", config.server.bind);
    println!("logs: {}", haven_core::logging::log_file_path().display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
