//! Wire model shared by the cradle signaling relay and its clients.

mod error;
pub mod model;

pub use error::CodecError;
pub use model::{Envelope, PeerId, Role};
