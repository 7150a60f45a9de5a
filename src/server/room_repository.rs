use super::{Connection, JoinOutcome};
use crate::model::{ConnectionId, RelayError, RoomId};
use async_trait::async_trait;

/// The authoritative room membership store. Implementations serialize every
/// mutation and snapshot of a room's member list.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Adds `connection` to the room, creating the room on first use.
    /// A full room leaves membership untouched.
    async fn join(
        &self,
        room_id: RoomId,
        connection: Connection,
    ) -> Result<JoinOutcome, RelayError>;

    /// Removes the connection from every room it is in and returns those
    /// rooms. Unknown connections are a no-op.
    async fn leave(&self, connection_id: ConnectionId) -> Result<Vec<RoomId>, RelayError>;

    /// Point-in-time copy of a room's members in join order.
    async fn members_of(&self, room_id: &RoomId) -> Result<Vec<Connection>, RelayError>;

    async fn room_count(&self) -> Result<usize, RelayError>;
}
