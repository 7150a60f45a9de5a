use super::{websocket_listener, RelayState};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;

/// Body returned to plain HTTP requests.
pub const CONFIRMATION_BODY: &str = "ARNNVV\n";

/// Every path accepts a websocket upgrade; anything else gets the
/// confirmation body.
pub fn create_relay_route(relay: RelayState) -> Router {
    Router::new().fallback(handle_request).with_state(relay)
}

async fn handle_request(
    State(relay): State<RelayState>,
    ws: Option<WebSocketUpgrade>,
) -> Response {
    match ws {
        Some(ws) => websocket_listener::handle_websocket(ws, relay),
        None => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            CONFIRMATION_BODY,
        )
            .into_response(),
    }
}
