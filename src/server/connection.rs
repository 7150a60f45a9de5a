use crate::model::ConnectionId;
use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Handle to one open websocket. The registry holds clones of it; the socket
/// itself stays with its listener task.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub sender: UnboundedSender<Message>,
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}

impl Connection {
    pub fn new(id: ConnectionId, sender: UnboundedSender<Message>) -> Self {
        Connection { id, sender }
    }

    pub fn with_random_id(sender: UnboundedSender<Message>) -> Self {
        Self::new(Uuid::new_v4(), sender)
    }

    /// Open until the writer task drops its receiver.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Queues a frame without waiting. Returns `false` if the connection is gone.
    pub fn deliver(&self, message: Message) -> bool {
        self.sender.send(message).is_ok()
    }
}
