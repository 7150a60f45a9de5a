mod relay_steps;

#[path = "../support/mod.rs"]
mod support;

use cucumber::World;
use std::collections::HashMap;
use support::{TestClient, TestServer};

#[derive(Debug, Default, World)]
pub struct RelayWorld {
    /// Relay under test
    pub server: Option<TestServer>,

    /// Connected players by name
    pub clients: HashMap<String, TestClient>,

    /// Room each player last asked to join
    pub rooms: HashMap<String, String>,
}

impl RelayWorld {
    pub fn server(&self) -> &TestServer {
        self.server.as_ref().expect("No relay running")
    }

    pub async fn client(&mut self, name: &str) -> &mut TestClient {
        if !self.clients.contains_key(name) {
            let client = TestClient::connect(self.server()).await;
            self.clients.insert(name.to_string(), client);
        }
        self.clients
            .get_mut(name)
            .unwrap_or_else(|| panic!("Player '{}' not connected", name))
    }
}
