use crate::error::RelayError;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3443";
pub const DEFAULT_WS_PATH: &str = "/ws";
pub const DEFAULT_OUTBOUND_QUEUE: usize = 64;
pub const DEFAULT_PRUNE_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
    /// Route that upgrades to the signaling WebSocket.
    pub ws_path: String,
    /// Envelopes buffered per peer before further sends to it are dropped.
    pub outbound_queue: usize,
    /// Periodically forget rooms nobody is in. Off by default: rooms live forever.
    pub prune_empty_rooms: bool,
    pub prune_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3443)),
            ws_path: DEFAULT_WS_PATH.to_string(),
            outbound_queue: DEFAULT_OUTBOUND_QUEUE,
            prune_empty_rooms: false,
            prune_interval: Duration::from_secs(DEFAULT_PRUNE_INTERVAL_SECS),
        }
    }
}

impl RelayConfig {
    pub fn validate(&self) -> Result<(), RelayError> {
        if !self.ws_path.starts_with('/') {
            return Err(RelayError::Config(format!(
                "ws_path must start with '/', got '{}'",
                self.ws_path
            )));
        }
        if self.ws_path == "/health" {
            return Err(RelayError::Config(
                "ws_path cannot shadow the /health route".into(),
            ));
        }
        if self.outbound_queue == 0 {
            return Err(RelayError::Config("outbound_queue must be at least 1".into()));
        }
        if self.prune_interval.is_zero() {
            return Err(RelayError::Config("prune_interval must be non-zero".into()));
        }
        Ok(())
    }
}
