//! Signaling relay that pairs one broadcaster per room with any number of viewers.
//!
//! The relay never sees media. It keeps a registry of who is in which room under which role,
//! and forwards `offer`/`answer`/`candidate` envelopes between them.

mod app;
pub mod config;
mod error;
mod room;
mod signaling;
mod transport;

pub use app::*;
pub use config::RelayConfig;
pub use error::RelayError;
pub use room::*;
pub use signaling::*;
pub use transport::*;
