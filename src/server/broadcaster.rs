use super::RoomRepository;
use crate::model::{ConnectionId, GameState, OutboundMove, RelayError, RoomId};
use axum::extract::ws::Message;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fans a move out to the sender's room mates.
#[derive(Clone)]
pub struct Broadcaster {
    rooms: Arc<dyn RoomRepository>,
}

impl Broadcaster {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Broadcaster { rooms }
    }

    /// Delivers `state` to every open member of `room_id` except the sender
    /// and returns how many members it reached. Written over the whole member
    /// list rather than "the other player" so a larger room cap keeps working.
    #[instrument(skip(self, state))]
    pub async fn relay(
        &self,
        room_id: &RoomId,
        sender_id: ConnectionId,
        state: &GameState,
    ) -> Result<usize, RelayError> {
        let members = self.rooms.members_of(room_id).await?;
        let recipients: Vec<_> = members
            .into_iter()
            .filter(|member| member.id != sender_id)
            .collect();

        if recipients.is_empty() {
            debug!("No one to relay to");
            return Ok(0);
        }

        let frame = OutboundMove::new(state).encode()?;
        let mut delivered = 0;
        for recipient in recipients {
            if !recipient.is_open() {
                debug!(recipient = %recipient.id, "Skipping closed connection");
                continue;
            }
            if recipient.deliver(Message::Text(frame.clone())) {
                delivered += 1;
            } else {
                debug!(recipient = %recipient.id, "Connection closed during relay");
            }
        }

        debug!(delivered, "Move relayed");
        Ok(delivered)
    }
}
