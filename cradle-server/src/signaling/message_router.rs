use crate::error::RelayError;
use crate::room::RoomRegistry;
use crate::signaling::PeerSession;
use crate::transport::PeerHandle;
use cradle_core::{Envelope, PeerId, Role};
use tracing::{debug, info};

/// What a successfully routed envelope did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The peer was registered; `notified` broadcasters were told about it.
    Joined { notified: usize },
    /// A negotiation message reached `delivered` of its `recipients`.
    Forwarded { recipients: usize, delivered: usize },
}

/// Decides who hears about each inbound envelope.
#[derive(Clone)]
pub struct MessageRouter {
    registry: RoomRegistry,
}

impl MessageRouter {
    pub fn new(registry: RoomRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn route(
        &self,
        session: &mut PeerSession,
        envelope: Envelope,
    ) -> Result<RouteOutcome, RelayError> {
        match envelope {
            Envelope::Join { room, role } => self.join(session, room, role),
            negotiation if negotiation.is_negotiation() => self.forward(session, negotiation),
            other => Err(RelayError::ServerOnly(other.kind())),
        }
    }

    /// A repeated `join` for the same room and role re-announces the peer, which is how a
    /// viewer asks the broadcaster for a fresh offer after its connection failed.
    fn join(
        &self,
        session: &mut PeerSession,
        room: String,
        role: Role,
    ) -> Result<RouteOutcome, RelayError> {
        let first = session.mark_joined(&room, role)?;

        self.registry.join_room(&room, role, session.handle().clone());
        if first {
            info!("Peer {} joined room '{}' as {}", session.id(), room, role);
        } else {
            info!("Peer {} re-joined room '{}' as {}", session.id(), room, role);
        }

        let notified = match role {
            Role::Viewer => {
                let broadcasters = self.registry.pool(&room, Role::Broadcaster);
                fan_out(&broadcasters, &Envelope::viewer_joined(session.id()))
            }
            Role::Broadcaster => 0,
        };

        Ok(RouteOutcome::Joined { notified })
    }

    fn forward(
        &self,
        session: &PeerSession,
        envelope: Envelope,
    ) -> Result<RouteOutcome, RelayError> {
        let (room, role) = session
            .membership()
            .ok_or(RelayError::NotJoined(session.id()))?;

        let recipients = match envelope.target_id() {
            Some(target) => {
                let found: Vec<PeerHandle> = self.registry.find(room, &target).into_iter().collect();
                if found.is_empty() {
                    debug!(
                        "Dropping {} from {}: target {} is not in room '{}'",
                        envelope.kind(),
                        session.id(),
                        target,
                        room
                    );
                }
                found
            }
            None => self.registry.pool(room, role.opposite()),
        };

        let envelope = envelope.with_sender(session.id());
        let delivered = fan_out(&recipients, &envelope);

        Ok(RouteOutcome::Forwarded {
            recipients: recipients.len(),
            delivered,
        })
    }
}

/// Best-effort send of one envelope to each recipient. A failed send is logged and skipped so
/// the rest of the set still gets the message. Returns how many sends were queued.
pub(crate) fn fan_out(recipients: &[PeerHandle], envelope: &Envelope) -> usize {
    recipients
        .iter()
        .filter(|peer| match peer.send(envelope.clone()) {
            Ok(()) => true,
            Err(e) => {
                debug!("Skipping {} for {}: {}", envelope.kind(), peer.id(), e);
                false
            }
        })
        .count()
}

/// Notifies everyone still in `room` that `departed` is gone.
pub(crate) fn announce_departure(registry: &RoomRegistry, room: &str, departed: PeerId) -> usize {
    let remaining = registry.all_peers(room);
    fan_out(&remaining, &Envelope::peer_left(departed))
}
