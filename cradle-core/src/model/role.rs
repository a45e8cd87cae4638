use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the media session a peer plays in its room.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Originates media and sends offers.
    Broadcaster,
    /// Receives media and answers offers.
    Viewer,
}

impl Role {
    /// The pool an untargeted negotiation message from this role fans out to.
    pub fn opposite(self) -> Self {
        match self {
            Role::Broadcaster => Role::Viewer,
            Role::Viewer => Role::Broadcaster,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Broadcaster => f.write_str("broadcaster"),
            Role::Viewer => f.write_str("viewer"),
        }
    }
}
