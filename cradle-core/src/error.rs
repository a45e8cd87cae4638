use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// The frame is not JSON, or carries no recognized `type`.
    #[error("malformed envelope: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),
}
