use crate::error::CodecError;
use crate::model::{PeerId, Role};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One JSON object per frame, dispatched on its `type` field.
///
/// `offer`, `answer` and `candidate` are negotiation messages: the relay never looks inside their
/// payload, it only reads `targetId` and stamps `fromId` before forwarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Envelope {
    Join {
        room: String,
        role: Role,
    },
    Offer {
        offer: Value,
        #[serde(
            rename = "targetId",
            default,
            deserialize_with = "blank_as_none",
            skip_serializing_if = "Option::is_none"
        )]
        target_id: Option<PeerId>,
        #[serde(rename = "fromId", default, skip_serializing_if = "Option::is_none")]
        from_id: Option<PeerId>,
    },
    Answer {
        answer: Value,
        #[serde(
            rename = "targetId",
            default,
            deserialize_with = "blank_as_none",
            skip_serializing_if = "Option::is_none"
        )]
        target_id: Option<PeerId>,
        #[serde(rename = "fromId", default, skip_serializing_if = "Option::is_none")]
        from_id: Option<PeerId>,
    },
    /// A null or missing `candidate` marks the end of the sender's candidates.
    Candidate {
        #[serde(default)]
        candidate: Value,
        #[serde(
            rename = "targetId",
            default,
            deserialize_with = "blank_as_none",
            skip_serializing_if = "Option::is_none"
        )]
        target_id: Option<PeerId>,
        #[serde(rename = "fromId", default, skip_serializing_if = "Option::is_none")]
        from_id: Option<PeerId>,
    },
    ViewerJoined {
        #[serde(rename = "viewerId")]
        viewer_id: PeerId,
    },
    PeerLeft {
        #[serde(rename = "peerId")]
        peer_id: PeerId,
    },
}

/// Reads an optional peer id where `null` and `""` both mean "no peer".
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<PeerId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(id) if !id.is_empty() => id
            .parse::<PeerId>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl Envelope {
    pub fn decode(frame: &str) -> Result<Self, CodecError> {
        serde_json::from_str(frame).map_err(CodecError::Malformed)
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(CodecError::Encode)
    }

    pub fn viewer_joined(viewer_id: PeerId) -> Self {
        Envelope::ViewerJoined { viewer_id }
    }

    pub fn peer_left(peer_id: PeerId) -> Self {
        Envelope::PeerLeft { peer_id }
    }

    /// Wire name of the variant, as it appears in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Envelope::Join { .. } => "join",
            Envelope::Offer { .. } => "offer",
            Envelope::Answer { .. } => "answer",
            Envelope::Candidate { .. } => "candidate",
            Envelope::ViewerJoined { .. } => "viewer-joined",
            Envelope::PeerLeft { .. } => "peer-left",
        }
    }

    pub fn is_negotiation(&self) -> bool {
        matches!(
            self,
            Envelope::Offer { .. } | Envelope::Answer { .. } | Envelope::Candidate { .. }
        )
    }

    pub fn target_id(&self) -> Option<PeerId> {
        match self {
            Envelope::Offer { target_id, .. }
            | Envelope::Answer { target_id, .. }
            | Envelope::Candidate { target_id, .. } => *target_id,
            _ => None,
        }
    }

    pub fn from_id(&self) -> Option<PeerId> {
        match self {
            Envelope::Offer { from_id, .. }
            | Envelope::Answer { from_id, .. }
            | Envelope::Candidate { from_id, .. } => *from_id,
            _ => None,
        }
    }

    /// Stamps `fromId` on a negotiation message, replacing whatever the client put there.
    /// Other variants are returned unchanged.
    pub fn with_sender(mut self, sender: PeerId) -> Self {
        match &mut self {
            Envelope::Offer { from_id, .. }
            | Envelope::Answer { from_id, .. }
            | Envelope::Candidate { from_id, .. } => *from_id = Some(sender),
            _ => {}
        }
        self
    }
}
