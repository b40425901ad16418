//! showbook-web - venue/artist/show booking directory
//!
//! Serves the HTML pages for listing, searching, creating and editing venues
//! and artists, and for booking shows between them.

use anyhow::{Context, Result};
use clap::Parser;
use showbook_common::config::{CliOverrides, ConfigResolver};
use showbook_common::db::init_database;
use showbook_web::{build_router, AppState};
use std::net::IpAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "showbook-web")]
#[command(about = "Venue, artist and show booking directory")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/showbook/config.toml)
    #[arg(short, long, env = "SHOWBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(short, long)]
    bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Settings first: the configured log level feeds the subscriber
    let resolver = ConfigResolver::new(args.config);
    let settings = resolver.resolve(CliOverrides {
        database_path: args.database,
        bind_address: args.bind,
        port: args.port,
        log_level: args.log_level,
    });

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", settings.log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting showbook-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match resolver.config_file() {
        Some(path) => info!("Config file: {}", path.display()),
        None => warn!("No config directory on this platform; using environment and defaults"),
    }
    info!("Database path: {}", settings.database_path.display());

    let pool = match init_database(&settings.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e).context("Database initialization failed");
        }
    };

    let app = build_router(AppState::new(pool.clone()));

    let addr = settings.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("showbook-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
