mod envelope;
mod peer;
mod role;

pub use envelope::Envelope;
pub use peer::PeerId;
pub use role::Role;
