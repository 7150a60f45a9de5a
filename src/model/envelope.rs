use super::{ProtocolError, RoomId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

const JOIN: &str = "join";
const MOVE: &str = "move";

/// Game state as sent by a client. Kept as the raw JSON text it arrived in so
/// the relay forwards it byte for byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameState(Box<RawValue>);

impl GameState {
    pub fn from_json(json: impl Into<String>) -> Result<Self, ProtocolError> {
        Ok(GameState(RawValue::from_string(json.into())?))
    }

    pub fn as_json(&self) -> &str {
        self.0.get()
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.as_json() == other.as_json()
    }
}

/// A client-originated message.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Join { room_id: RoomId },
    Move { room_id: RoomId, state: GameState },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    room_id: Option<String>,
    #[serde(default, deserialize_with = "present")]
    state: Option<GameState>,
}

// An explicit `null` state is still a state.
fn present<'de, D>(deserializer: D) -> Result<Option<GameState>, D::Error>
where
    D: Deserializer<'de>,
{
    GameState::deserialize(deserializer).map(Some)
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "roomId")]
    room_id: &'a RoomId,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a GameState>,
}

impl Envelope {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let raw: RawEnvelope = serde_json::from_str(text)?;
        let kind = raw.kind.ok_or(ProtocolError::MissingField("type"))?;
        let room_id = raw.room_id.ok_or(ProtocolError::MissingField("roomId"))?;

        match kind.as_str() {
            JOIN => Ok(Envelope::Join {
                room_id: RoomId::new(room_id)?,
            }),
            MOVE => {
                let room_id = RoomId::new(room_id)?;
                let state = raw.state.ok_or(ProtocolError::MissingField("state"))?;
                Ok(Envelope::Move { room_id, state })
            }
            _ => Err(ProtocolError::UnknownType(kind)),
        }
    }

    /// Binary frames are accepted as long as they carry UTF-8 JSON.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ProtocolError::NotUtf8)?;
        Self::decode(text)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        let envelope = match self {
            Envelope::Join { room_id } => EnvelopeRef {
                kind: JOIN,
                room_id,
                state: None,
            },
            Envelope::Move { room_id, state } => EnvelopeRef {
                kind: MOVE,
                room_id,
                state: Some(state),
            },
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    pub fn room_id(&self) -> &RoomId {
        match self {
            Envelope::Join { room_id } | Envelope::Move { room_id, .. } => room_id,
        }
    }
}

/// The frame a room member receives when its peer moves. The room id is not
/// repeated.
#[derive(Debug, Serialize)]
pub struct OutboundMove<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    state: &'a GameState,
}

impl<'a> OutboundMove<'a> {
    pub fn new(state: &'a GameState) -> Self {
        OutboundMove { kind: MOVE, state }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
