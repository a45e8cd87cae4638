use anyhow::{Context, Result};
use clap::Parser;
use cradle_server::config::{
    DEFAULT_BIND_ADDR, DEFAULT_OUTBOUND_QUEUE, DEFAULT_PRUNE_INTERVAL_SECS, DEFAULT_WS_PATH,
};
use cradle_server::{AppState, RelayConfig, build_router, spawn_room_pruner};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cradle", version, about = "WebRTC signaling relay for broadcaster/viewer rooms")]
struct Cli {
    /// Address the HTTP/WebSocket listener binds to.
    #[arg(long, env = "CRADLE_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,

    /// Path that upgrades to the signaling WebSocket.
    #[arg(long, env = "CRADLE_WS_PATH", default_value = DEFAULT_WS_PATH)]
    ws_path: String,

    /// Envelopes buffered per peer before sends to it start being dropped.
    #[arg(long, env = "CRADLE_OUTBOUND_QUEUE", default_value_t = DEFAULT_OUTBOUND_QUEUE)]
    outbound_queue: usize,

    /// Forget rooms once nobody is left in them.
    #[arg(long, env = "CRADLE_PRUNE_EMPTY_ROOMS")]
    prune_empty_rooms: bool,

    #[arg(long, env = "CRADLE_PRUNE_INTERVAL_SECS", default_value_t = DEFAULT_PRUNE_INTERVAL_SECS)]
    prune_interval_secs: u64,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "CRADLE_LOG", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            bind_addr: self.bind,
            ws_path: self.ws_path.clone(),
            outbound_queue: self.outbound_queue,
            prune_empty_rooms: self.prune_empty_rooms,
            prune_interval: Duration::from_secs(self.prune_interval_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_target(true)
        .init();

    let config = cli.relay_config();
    config.validate().context("Invalid relay configuration")?;

    info!("Initializing cradle relay v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config.clone());

    let pruner = config
        .prune_empty_rooms
        .then(|| spawn_room_pruner(state.registry.clone(), config.prune_interval));

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(
        "Signaling relay listening on ws://{}{}",
        config.bind_addr, config.ws_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(pruner) = pruner {
        pruner.abort();
    }
    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
