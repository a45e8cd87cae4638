use crate::error::RelayError;
use crate::room::RoomRegistry;
use crate::signaling::message_router::announce_departure;
use crate::signaling::{MessageRouter, RouteOutcome};
use crate::transport::PeerHandle;
use cradle_core::{Envelope, PeerId, Role};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Transport is up, no `join` seen yet.
    Connected,
    Joined { room: String, role: Role },
    Closed,
}

/// Per-connection state owned by the task that reads the socket.
#[derive(Debug)]
pub struct PeerSession {
    handle: PeerHandle,
    state: ConnectionState,
}

impl PeerSession {
    pub fn new(handle: PeerHandle) -> Self {
        Self {
            handle,
            state: ConnectionState::Connected,
        }
    }

    pub fn id(&self) -> PeerId {
        self.handle.id()
    }

    pub fn handle(&self) -> &PeerHandle {
        &self.handle
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn membership(&self) -> Option<(&str, Role)> {
        match &self.state {
            ConnectionState::Joined { room, role } => Some((room.as_str(), *role)),
            _ => None,
        }
    }

    /// Room and role are assigned once. Repeating the same `join` is accepted and returns
    /// `false`; a `join` naming another room or role is refused.
    pub(crate) fn mark_joined(&mut self, room: &str, role: Role) -> Result<bool, RelayError> {
        match &self.state {
            ConnectionState::Connected => {}
            ConnectionState::Joined {
                room: current,
                role: current_role,
            } if current == room && *current_role == role => return Ok(false),
            ConnectionState::Joined { room, role } => {
                return Err(RelayError::AlreadyJoined {
                    peer_id: self.id(),
                    room: room.clone(),
                    role: *role,
                });
            }
            ConnectionState::Closed => return Err(RelayError::Disconnected(self.id())),
        }

        self.state = ConnectionState::Joined {
            room: room.to_owned(),
            role,
        };
        Ok(true)
    }

    /// Moves to `Closed` and hands back the membership the peer had, if any.
    fn close(&mut self) -> Option<(String, Role)> {
        match std::mem::replace(&mut self.state, ConnectionState::Closed) {
            ConnectionState::Joined { room, role } => Some((room, role)),
            _ => None,
        }
    }
}

/// Glue between a transport connection and the router.
///
/// The transport calls [`open`](Self::open) once per connection, [`on_frame`](Self::on_frame)
/// for every inbound text frame in arrival order, and [`on_close`](Self::on_close) when the
/// connection goes away for any reason.
#[derive(Clone)]
pub struct ConnectionLifecycle {
    router: MessageRouter,
    outbound_queue: usize,
}

impl ConnectionLifecycle {
    pub fn new(registry: RoomRegistry, outbound_queue: usize) -> Self {
        Self {
            router: MessageRouter::new(registry),
            outbound_queue,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        self.router.registry()
    }

    /// Creates the session and the outbound queue the transport writer drains.
    pub fn open(&self) -> (PeerSession, mpsc::Receiver<Envelope>) {
        let (handle, outbound) = PeerHandle::channel(self.outbound_queue);
        let session = PeerSession::new(handle);
        debug!("Opened session {}", session.id());
        (session, outbound)
    }

    /// Decodes and routes one frame. Nothing is ever sent back to the sender on failure.
    pub fn on_frame(&self, session: &mut PeerSession, frame: &str) -> Option<RouteOutcome> {
        let result = Envelope::decode(frame)
            .map_err(RelayError::from)
            .and_then(|envelope| self.router.route(session, envelope));

        match result {
            Ok(outcome) => Some(outcome),
            Err(e @ RelayError::AlreadyJoined { .. }) => {
                warn!("Ignoring join: {}", e);
                None
            }
            Err(e) => {
                debug!("Dropping frame from {}: {}", session.id(), e);
                None
            }
        }
    }

    /// Removes the peer from its room and tells the rest of the room. Calling it again on a
    /// closed session does nothing.
    pub fn on_close(&self, session: &mut PeerSession) -> usize {
        let Some((room, role)) = session.close() else {
            return 0;
        };

        let registry = self.router.registry();
        registry.remove_peer(&room, role, &session.id());
        let notified = announce_departure(registry, &room, session.id());

        info!(
            "Peer {} left room '{}' ({} notified)",
            session.id(),
            room,
            notified
        );
        notified
    }
}
