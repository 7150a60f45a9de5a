use super::{Connection, JoinOutcome, Room, RoomRepository};
use crate::model::{ConnectionId, RelayError, RoomId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, instrument};

/// In-process room registry. Rooms are created lazily and kept for the
/// lifetime of the process, even once empty.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    rooms: Arc<RwLock<HashMap<RoomId, Room>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for MemoryStorage {
    #[instrument(skip(self, connection))]
    async fn join(
        &self,
        room_id: RoomId,
        connection: Connection,
    ) -> Result<JoinOutcome, RelayError> {
        let connection_id = connection.id;
        match self.rooms.write() {
            Ok(mut rooms) => {
                let room = rooms.entry(room_id).or_insert_with(Room::new);
                let outcome = room.admit(connection);
                debug!(%connection_id, ?outcome, members = room.len(), "Join processed");
                Ok(outcome)
            }
            Err(e) => {
                error!(?e, "Failed to join room");
                Err(RelayError::Registry(e.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn leave(&self, connection_id: ConnectionId) -> Result<Vec<RoomId>, RelayError> {
        match self.rooms.write() {
            Ok(mut rooms) => {
                let left: Vec<RoomId> = rooms
                    .iter_mut()
                    .filter_map(|(room_id, room)| {
                        room.remove(connection_id).then(|| room_id.clone())
                    })
                    .collect();
                debug!(?left, "Connection removed from rooms");
                Ok(left)
            }
            Err(e) => {
                error!(?e, "Failed to leave rooms");
                Err(RelayError::Registry(e.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn members_of(&self, room_id: &RoomId) -> Result<Vec<Connection>, RelayError> {
        match self.rooms.read() {
            Ok(rooms) => Ok(rooms
                .get(room_id)
                .map(|room| room.members().to_vec())
                .unwrap_or_default()),
            Err(e) => {
                error!(?e, "Failed to read room members");
                Err(RelayError::Registry(e.to_string()))
            }
        }
    }

    async fn room_count(&self) -> Result<usize, RelayError> {
        self.rooms
            .read()
            .map(|rooms| rooms.len())
            .map_err(|e| RelayError::Registry(e.to_string()))
    }
}
