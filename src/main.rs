//! Mini Cache - A concurrency-safe in-memory key-value cache
//!
//! Runs either the CLI demo (default) or the REST server.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::api::{create_router, AppState};
use mini_cache::demo::{run_demo, DEMO_TTL};
use mini_cache::{CacheMode, Config};

/// Mini Cache - in-memory key-value cache with TTL expiration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through both cache variants and print each step
    Demo,
    /// Serve the cache over HTTP
    Serve {
        /// Port
        #[arg(short, long, env = "SERVER_PORT")]
        port: Option<u16>,

        /// Cache variant
        #[arg(long, value_enum, env = "CACHE_MODE")]
        mode: Option<CacheMode>,

        /// Entry TTL in milliseconds
        #[arg(long, env = "CACHE_TTL_MS")]
        ttl_ms: Option<u64>,

        /// Sweep interval in milliseconds
        #[arg(long, env = "SWEEP_INTERVAL_MS")]
        sweep_interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(DEMO_TTL).await,
        Command::Serve {
            port,
            mode,
            ttl_ms,
            sweep_interval_ms,
        } => {
            let mut config = Config::from_env();
            if let Some(port) = port {
                config.server_port = port;
            }
            if let Some(mode) = mode {
                config.cache_mode = mode;
            }
            if let Some(ttl_ms) = ttl_ms {
                config.ttl_ms = ttl_ms;
            }
            if sweep_interval_ms.is_some() {
                config.sweep_interval_ms = sweep_interval_ms;
            }
            serve(config).await
        }
    }
}

/// Starts the REST server and closes the cache once it has shut down.
async fn serve(config: Config) -> Result<()> {
    info!("Starting Mini Cache server");
    info!(
        "Configuration loaded: mode={}, ttl={}ms, sweep_interval={:?}, port={}",
        config.cache_mode, config.ttl_ms, config.sweep_interval_ms, config.server_port
    );

    let state = AppState::from_config(&config).context("failed to create cache")?;
    info!("Cache initialized ({})", state.mode);

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state.close().await.context("failed to close cache")?;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
