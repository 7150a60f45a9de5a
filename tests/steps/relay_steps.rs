use super::support::{outbound_move, TestServer, QUIET_PERIOD, RECEIVE_TIMEOUT};
use super::RelayWorld;
use cucumber::{given, then, when};
use tokio::time::sleep;

// ===== Given Steps =====

#[given("a running relay")]
async fn running_relay(world: &mut RelayWorld) {
    world.server = Some(TestServer::spawn().await);
}

#[given(expr = "{string} joins room {string}")]
async fn player_joins_room(world: &mut RelayWorld, name: String, room: String) {
    let before = world.server().member_count(&room).await;

    world.client(&name).await.join(&room).await;
    world.rooms.insert(name, room.clone());

    if before < 2 {
        world.server().wait_for_members(&room, before + 1).await;
    } else {
        // Nothing observable changes when the room is full.
        sleep(QUIET_PERIOD).await;
    }
}

// ===== When Steps =====

#[when(expr = "{string} joins room {string}")]
async fn player_joins_room_later(world: &mut RelayWorld, name: String, room: String) {
    player_joins_room(world, name, room).await;
}

#[when(expr = "{string} sends a move to room {string} with state {string}")]
async fn player_sends_move(world: &mut RelayWorld, name: String, room: String, state: String) {
    world.client(&name).await.send_move(&room, &state).await;
}

#[when(expr = "{string} disconnects")]
async fn player_disconnects(world: &mut RelayWorld, name: String) {
    let client = world
        .clients
        .remove(&name)
        .unwrap_or_else(|| panic!("Player '{}' not connected", name));
    let room = world.rooms.remove(&name);
    let before = match &room {
        Some(room) => world.server().member_count(room).await,
        None => 0,
    };

    client.close().await;

    if let Some(room) = room {
        world
            .server()
            .wait_for_members(&room, before.saturating_sub(1))
            .await;
    }
}

#[when(expr = "{string} sends the text {string}")]
async fn player_sends_text(world: &mut RelayWorld, name: String, text: String) {
    world.client(&name).await.send_text(&text).await;
}

// ===== Then Steps =====

#[then(expr = "{string} receives exactly one move with state {string}")]
async fn player_receives_one_move(world: &mut RelayWorld, name: String, state: String) {
    let client = world.client(&name).await;
    assert_eq!(
        client.next_text(RECEIVE_TIMEOUT).await,
        Some(outbound_move(&state))
    );
    assert_eq!(client.next_text(QUIET_PERIOD).await, None);
}

#[then(expr = "{string} receives nothing")]
async fn player_receives_nothing(world: &mut RelayWorld, name: String) {
    let client = world.client(&name).await;
    assert_eq!(client.next_text(QUIET_PERIOD).await, None);
}

#[then(expr = "room {string} has {int} member(s)")]
async fn room_has_members(world: &mut RelayWorld, room: String, count: usize) {
    assert_eq!(world.server().member_count(&room).await, count);
}
