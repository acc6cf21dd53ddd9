use std::path::PathBuf;

use anyhow::{Context, Result};
use calhub_core::snapshot;
use calhub_server::config::{Overrides, ServerConfig};
use calhub_server::singleton;
use calhub_server::state::AppState;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "calhub-server")]
#[command(about = "Serve users, calendars and events over HTTP from a JSON snapshot")]
struct Cli {
    /// Config file (defaults to ~/.config/calhub/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (e.g. "127.0.0.1:4096")
    #[arg(short, long)]
    bind: Option<String>,

    /// Snapshot file to load at startup and save at shutdown
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig::load(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            snapshot_path: cli.snapshot,
            log_level: cli.log_level,
        },
    )?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    init_tracing(&config.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting calhub-server");

    let snapshot_path = config.snapshot_path();

    // Ensure only one instance owns this snapshot
    let _lock = singleton::acquire_lock(&snapshot_path)?;

    let index = snapshot::load_or_default(&snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;
    let state = AppState::new(index);

    let mut app = calhub_server::app(state.clone());
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!(address = %config.bind_address, "Server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // In-flight requests have drained; persist whatever state we ended with
    match state.save_snapshot(&snapshot_path).await {
        Ok(()) => info!(path = %snapshot_path.display(), "Snapshot saved"),
        Err(e) => error!(path = %snapshot_path.display(), error = %e, "Failed to save snapshot"),
    }

    served?;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("calhub_server={log_level},calhub_core={log_level},tower_http=debug").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
