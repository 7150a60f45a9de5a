use super::Connection;
use crate::model::ConnectionId;

pub const ROOM_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyMember,
    RoomFull,
}

/// Members in join order, never more than [`ROOM_CAPACITY`].
#[derive(Debug, Clone, Default)]
pub struct Room {
    members: Vec<Connection>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, connection: Connection) -> JoinOutcome {
        if self.contains(connection.id) {
            JoinOutcome::AlreadyMember
        } else if self.is_full() {
            JoinOutcome::RoomFull
        } else {
            self.members.push(connection);
            JoinOutcome::Joined
        }
    }

    pub fn remove(&mut self, id: ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.id != id);
        self.members.len() != before
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.members.iter().any(|member| member.id == id)
    }

    pub fn members(&self) -> &[Connection] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= ROOM_CAPACITY
    }
}
