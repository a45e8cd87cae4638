use crate::transport::PeerHandle;
use cradle_core::{PeerId, Role};
use std::collections::HashMap;

/// The two peer sets of one room.
///
/// A peer id appears in at most one of them; the registry hands out clones, so a `Room` value
/// outside the registry is a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Room {
    broadcasters: HashMap<PeerId, PeerHandle>,
    viewers: HashMap<PeerId, PeerHandle>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the peer is already present in either set.
    pub fn insert(&mut self, role: Role, peer: PeerHandle) -> bool {
        let id = peer.id();
        if self.role_of(&id).is_some() {
            return false;
        }
        self.set_mut(role).insert(id, peer);
        true
    }

    pub fn remove(&mut self, role: Role, peer_id: &PeerId) -> bool {
        self.set_mut(role).remove(peer_id).is_some()
    }

    pub fn pool(&self, role: Role) -> impl Iterator<Item = &PeerHandle> {
        self.set(role).values()
    }

    pub fn all_peers(&self) -> impl Iterator<Item = &PeerHandle> {
        self.broadcasters.values().chain(self.viewers.values())
    }

    pub fn find(&self, peer_id: &PeerId) -> Option<&PeerHandle> {
        self.broadcasters
            .get(peer_id)
            .or_else(|| self.viewers.get(peer_id))
    }

    pub fn role_of(&self, peer_id: &PeerId) -> Option<Role> {
        if self.broadcasters.contains_key(peer_id) {
            Some(Role::Broadcaster)
        } else if self.viewers.contains_key(peer_id) {
            Some(Role::Viewer)
        } else {
            None
        }
    }

    pub fn count(&self, role: Role) -> usize {
        self.set(role).len()
    }

    pub fn len(&self) -> usize {
        self.broadcasters.len() + self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.broadcasters.is_empty() && self.viewers.is_empty()
    }

    fn set(&self, role: Role) -> &HashMap<PeerId, PeerHandle> {
        match role {
            Role::Broadcaster => &self.broadcasters,
            Role::Viewer => &self.viewers,
        }
    }

    fn set_mut(&mut self, role: Role) -> &mut HashMap<PeerId, PeerHandle> {
        match role {
            Role::Broadcaster => &mut self.broadcasters,
            Role::Viewer => &mut self.viewers,
        }
    }
}
