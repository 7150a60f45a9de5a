pub mod config;
pub mod model;

#[cfg(feature = "server")]
pub mod server;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::model::{ConnectionId, Envelope, GameState, ProtocolError, RelayError, RoomId};
    #[cfg(feature = "server")]
    pub use crate::server::{Broadcaster, MemoryStorage, RelayServer, RoomRepository};
}
