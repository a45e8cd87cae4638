use crate::error::RelayError;
use cradle_core::{Envelope, PeerId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Sending half of one peer's outbound queue.
///
/// Cloned into every room set the peer belongs to. The connection's writer task owns the
/// receiving half and is the only thing that touches the socket.
#[derive(Debug, Clone)]
pub struct PeerHandle {
    id: PeerId,
    tx: mpsc::Sender<Envelope>,
}

impl PeerHandle {
    /// Creates a handle with a fresh identity and a queue holding at most `capacity` envelopes.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Envelope>) {
        Self::with_id(PeerId::new(), capacity)
    }

    pub fn with_id(id: PeerId, capacity: usize) -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { id, tx }, rx)
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    /// Queues an envelope without waiting. A full queue or a closed connection drops it.
    pub fn send(&self, envelope: Envelope) -> Result<(), RelayError> {
        self.tx.try_send(envelope).map_err(|e| match e {
            TrySendError::Full(_) => RelayError::QueueFull(self.id),
            TrySendError::Closed(_) => RelayError::Disconnected(self.id),
        })
    }
}

impl PartialEq for PeerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PeerHandle {}
