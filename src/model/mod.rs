mod envelope;
mod error;
mod room_id;

pub use envelope::{Envelope, GameState, OutboundMove};
pub use error::{ProtocolError, RelayError};
pub use room_id::{ConnectionId, RoomId};
