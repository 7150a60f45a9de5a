mod broadcaster;
mod connection;
mod connection_handler;
mod memory_storage;
mod relay_server;
mod room;
mod room_repository;
pub mod route;
pub mod telemetry;
pub mod websocket_listener;

pub use broadcaster::Broadcaster;
pub use connection::Connection;
pub use connection_handler::{ConnectionHandler, ConnectionState, RelayState};
pub use memory_storage::MemoryStorage;
pub use relay_server::RelayServer;
pub use room::{JoinOutcome, Room, ROOM_CAPACITY};
pub use room_repository::RoomRepository;
pub use route::{create_relay_route, CONFIRMATION_BODY};
