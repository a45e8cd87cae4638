use crate::room::Room;
use crate::transport::PeerHandle;
use cradle_core::{PeerId, Role};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Room name to peer sets.
///
/// Each room sits behind its own dashmap entry lock, so a room's sets are never read while
/// another connection is half-way through mutating them. Readers get owned snapshots and do
/// their sending after the lock is released.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<String, Room>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub rooms: usize,
    pub broadcasters: usize,
    pub viewers: usize,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create_room(&self, name: &str) -> Room {
        if let Some(room) = self.rooms.get(name) {
            return room.clone();
        }

        info!("Creating new room: {}", name);
        self.rooms.entry(name.to_owned()).or_default().clone()
    }

    /// Creates the room if needed and inserts the peer while holding the room's entry lock, so
    /// a concurrent [`prune_empty`](Self::prune_empty) can never drop the room in between.
    /// Returns `false` when the peer was already in the room.
    pub fn join_room(&self, name: &str, role: Role, peer: PeerHandle) -> bool {
        match self.rooms.entry(name.to_owned()) {
            Entry::Occupied(mut room) => room.get_mut().insert(role, peer),
            Entry::Vacant(slot) => {
                info!("Creating new room: {}", name);
                let mut room = slot.insert(Room::new());
                room.insert(role, peer)
            }
        }
    }

    /// No-op when the room has not been created or the peer is already in it.
    pub fn add_peer(&self, room: &str, role: Role, peer: PeerHandle) -> bool {
        let Some(mut entry) = self.rooms.get_mut(room) else {
            debug!("add_peer on unknown room '{}' ignored", room);
            return false;
        };
        entry.insert(role, peer)
    }

    /// No-op when the room or the peer is absent.
    pub fn remove_peer(&self, room: &str, role: Role, peer_id: &PeerId) -> bool {
        let Some(mut entry) = self.rooms.get_mut(room) else {
            return false;
        };
        entry.remove(role, peer_id)
    }

    pub fn all_peers(&self, room: &str) -> Vec<PeerHandle> {
        self.rooms
            .get(room)
            .map(|r| r.all_peers().cloned().collect())
            .unwrap_or_default()
    }

    pub fn pool(&self, room: &str, role: Role) -> Vec<PeerHandle> {
        self.rooms
            .get(room)
            .map(|r| r.pool(role).cloned().collect())
            .unwrap_or_default()
    }

    pub fn find(&self, room: &str, peer_id: &PeerId) -> Option<PeerHandle> {
        self.rooms.get(room)?.find(peer_id).cloned()
    }

    pub fn room(&self, name: &str) -> Option<Room> {
        self.rooms.get(name).map(|r| r.clone())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn stats(&self) -> RegistryStats {
        self.rooms
            .iter()
            .fold(RegistryStats::default(), |mut stats, entry| {
                stats.rooms += 1;
                stats.broadcasters += entry.count(Role::Broadcaster);
                stats.viewers += entry.count(Role::Viewer);
                stats
            })
    }

    /// Drops every room with no peers left. Returns how many were removed.
    pub fn prune_empty(&self) -> usize {
        let before = self.rooms.len();
        self.rooms.retain(|_, room| !room.is_empty());
        let removed = before.saturating_sub(self.rooms.len());
        if removed > 0 {
            info!("Pruned {} empty room(s)", removed);
        }
        removed
    }
}
