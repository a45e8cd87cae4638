use cradle_core::{CodecError, PeerId, Role};
use thiserror::Error;

/// Everything that can go wrong while relaying. None of these are reported back to the peer
/// that caused them; the connection loop logs them and moves on.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("outbound queue of peer {0} is full")]
    QueueFull(PeerId),

    #[error("peer {0} is disconnected")]
    Disconnected(PeerId),

    #[error("peer {peer_id} already joined room '{room}' as {role}")]
    AlreadyJoined {
        peer_id: PeerId,
        room: String,
        role: Role,
    },

    #[error("peer {0} sent a negotiation message before joining a room")]
    NotJoined(PeerId),

    #[error("'{0}' envelopes are only sent by the relay")]
    ServerOnly(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),
}
