use crate::config::RelayConfig;
use crate::room::{RegistryStats, RoomRegistry};
use crate::signaling::{ConnectionLifecycle, ws_handler};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// Composition root shared by every handler. Each `AppState` owns its own registry.
#[derive(Clone)]
pub struct AppState {
    pub registry: RoomRegistry,
    pub lifecycle: ConnectionLifecycle,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        Self::with_registry(config, RoomRegistry::new())
    }

    pub fn with_registry(config: RelayConfig, registry: RoomRegistry) -> Self {
        Self {
            lifecycle: ConnectionLifecycle::new(registry.clone(), config.outbound_queue),
            registry,
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub stats: RegistryStats,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(&state.config.ws_path, get(ws_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        stats: state.registry.stats(),
    })
}

/// Calls [`RoomRegistry::prune_empty`] every `interval` until the task is aborted.
pub fn spawn_room_pruner(registry: RoomRegistry, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            registry.prune_empty();
        }
    })
}
