use super::{Broadcaster, Connection, JoinOutcome, RoomRepository};
use crate::model::{ConnectionId, Envelope, GameState, ProtocolError, RelayError, RoomId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Joined(RoomId),
    Closed,
}

/// Shared pieces every connection handler needs.
#[derive(Clone)]
pub struct RelayState {
    pub rooms: Arc<dyn RoomRepository>,
    pub broadcaster: Broadcaster,
}

impl RelayState {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        RelayState {
            broadcaster: Broadcaster::new(rooms.clone()),
            rooms,
        }
    }
}

/// Dispatches the envelopes of a single connection.
pub struct ConnectionHandler {
    connection: Connection,
    state: ConnectionState,
    relay: RelayState,
}

impl ConnectionHandler {
    pub fn new(relay: RelayState, connection: Connection) -> Self {
        ConnectionHandler {
            connection,
            state: ConnectionState::Connected,
            relay,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Handles one text frame. Protocol errors are logged and the frame is
    /// dropped; only registry failures are returned.
    pub async fn handle_text(&mut self, text: &str) -> Result<(), RelayError> {
        self.dispatch(Envelope::decode(text)).await
    }

    pub async fn handle_binary(&mut self, bytes: &[u8]) -> Result<(), RelayError> {
        self.dispatch(Envelope::decode_bytes(bytes)).await
    }

    async fn dispatch(&mut self, envelope: Result<Envelope, ProtocolError>) -> Result<(), RelayError> {
        match envelope {
            Ok(Envelope::Join { room_id }) => self.join(room_id).await,
            Ok(Envelope::Move { room_id, state }) => self.relay_move(&room_id, &state).await,
            Err(e) => {
                warn!(connection_id = %self.connection.id, error = %e, "Dropping malformed envelope");
                Ok(())
            }
        }
    }

    #[instrument(skip(self), fields(connection_id = %self.connection.id))]
    pub async fn join(&mut self, room_id: RoomId) -> Result<(), RelayError> {
        match &self.state {
            ConnectionState::Connected => {}
            ConnectionState::Joined(current) => {
                debug!(%current, "Already joined, ignoring join");
                return Ok(());
            }
            ConnectionState::Closed => return Ok(()),
        }

        let outcome = self
            .relay
            .rooms
            .join(room_id.clone(), self.connection.clone())
            .await?;

        match outcome {
            JoinOutcome::Joined | JoinOutcome::AlreadyMember => {
                info!(%room_id, "Joined room");
                self.state = ConnectionState::Joined(room_id);
            }
            JoinOutcome::RoomFull => {
                info!(%room_id, "Room is full, join ignored");
            }
        }
        Ok(())
    }

    #[instrument(skip(self, state), fields(connection_id = %self.connection.id))]
    pub async fn relay_move(&self, room_id: &RoomId, state: &GameState) -> Result<(), RelayError> {
        if self.state == ConnectionState::Closed {
            return Ok(());
        }
        self.relay
            .broadcaster
            .relay(room_id, self.connection.id, state)
            .await?;
        Ok(())
    }

    /// Purges the connection from the registry. Safe to call more than once.
    #[instrument(skip(self), fields(connection_id = %self.connection.id))]
    pub async fn disconnect(&mut self) -> Result<(), RelayError> {
        if self.state == ConnectionState::Closed {
            return Ok(());
        }
        self.state = ConnectionState::Closed;
        let left = self.relay.rooms.leave(self.connection.id).await?;
        debug!(?left, "Connection closed");
        Ok(())
    }
}
