#![allow(dead_code)]

use duo_relay::config::Config;
use duo_relay::model::{Envelope, GameState, RoomId};
use duo_relay::server::{MemoryStorage, RelayServer, RoomRepository};
use futures_util::{SinkExt, StreamExt};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{sleep, timeout, Instant};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub const QUIET_PERIOD: Duration = Duration::from_millis(150);
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub storage: Arc<MemoryStorage>,
}

impl fmt::Debug for TestServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestServer").field("addr", &self.addr).finish()
    }
}

impl TestServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let server = RelayServer::with_repository(Config::default(), storage.clone());

        tokio::spawn(server.serve(listener, std::future::pending()));

        TestServer { addr, storage }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/", self.addr)
    }

    pub async fn member_count(&self, room: &str) -> usize {
        let room_id = RoomId::new(room).unwrap();
        self.storage.members_of(&room_id).await.unwrap().len()
    }

    /// Polls the registry until the room holds `expected` members.
    pub async fn wait_for_members(&self, room: &str, expected: usize) {
        let deadline = Instant::now() + RECEIVE_TIMEOUT;
        while self.member_count(room).await != expected {
            assert!(
                Instant::now() < deadline,
                "room {} never reached {} members",
                room,
                expected
            );
            sleep(Duration::from_millis(10)).await;
        }
    }
}

pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl fmt::Debug for TestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TestClient")
    }
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (ws, _response) = connect_async(server.url()).await.unwrap();
        TestClient { ws }
    }

    pub async fn send_text(&mut self, text: &str) {
        self.ws.send(Message::text(text)).await.unwrap();
    }

    pub async fn send_binary(&mut self, bytes: &[u8]) {
        self.ws.send(Message::binary(bytes.to_vec())).await.unwrap();
    }

    pub async fn join(&mut self, room: &str) {
        let envelope = Envelope::Join {
            room_id: RoomId::new(room).unwrap(),
        };
        self.send_text(&envelope.encode().unwrap()).await;
    }

    pub async fn send_move(&mut self, room: &str, state_json: &str) {
        let envelope = Envelope::Move {
            room_id: RoomId::new(room).unwrap(),
            state: GameState::from_json(state_json).unwrap(),
        };
        self.send_text(&envelope.encode().unwrap()).await;
    }

    /// Next text frame, or `None` if nothing arrives within `wait`.
    pub async fn next_text(&mut self, wait: Duration) -> Option<String> {
        match timeout(wait, self.ws.next()).await {
            Ok(Some(Ok(message))) if message.is_text() => {
                message.to_text().ok().map(str::to_string)
            }
            _ => None,
        }
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }

    /// Closes cleanly and reports whether the server answered with its own
    /// close frame.
    pub async fn close_with_reply(mut self) -> bool {
        self.ws.close(None).await.unwrap();
        loop {
            match timeout(RECEIVE_TIMEOUT, self.ws.next()).await {
                Ok(Some(Ok(message))) if message.is_close() => return true,
                Ok(Some(Ok(_))) => continue,
                _ => return false,
            }
        }
    }

    /// Drops the socket without a close handshake.
    pub fn drop_connection(self) {
        drop(self.ws);
    }
}

pub fn outbound_move(state_json: &str) -> String {
    format!(r#"{{"type":"move","state":{}}}"#, state_json)
}
