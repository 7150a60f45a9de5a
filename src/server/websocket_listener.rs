use super::{Connection, ConnectionHandler, RelayState};
use crate::model::RelayError;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::WebSocketUpgrade;
use axum::response::Response;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn, Span};

const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

pub fn handle_websocket(ws: WebSocketUpgrade, relay: RelayState) -> Response {
    debug!("New WebSocket upgrade request");
    ws.on_upgrade(move |socket| listen(socket, relay))
}

#[instrument(skip(socket, relay), fields(connection_id))]
async fn listen(socket: WebSocket, relay: RelayState) {
    let (ws_sender, ws_receiver) = socket.split();
    let (tx, rx) = unbounded_channel();
    let connection = Connection::with_random_id(tx);
    Span::current().record("connection_id", tracing::field::display(connection.id));
    info!("Connection accepted");

    let closer = connection.clone();
    let mut handler = ConnectionHandler::new(relay, connection);

    let sender_task = handle_outgoing_messages(rx, ws_sender);
    tokio::pin!(sender_task);

    let sender_finished = tokio::select! {
        _ = &mut sender_task => {
            debug!("Sender task completed");
            true
        }
        result = handle_incoming_messages(ws_receiver, &mut handler) => {
            match result {
                Ok(()) => debug!("Receiver task completed"),
                Err(e) => warn!(error = %e, "Connection ended with error"),
            }
            false
        }
    };

    if let Err(e) = handler.disconnect().await {
        error!(error = %e, "Failed to remove connection from rooms");
    }

    if !sender_finished {
        closer.deliver(Message::Close(None));
        if timeout(CLOSE_TIMEOUT, sender_task).await.is_err() {
            debug!("Timed out completing close handshake");
        }
    }
    info!("Connection closed");
}

/// Forwards queued frames to the socket. A queued close frame ends the loop,
/// after which the sink is closed so a pending close reply is flushed.
pub async fn handle_outgoing_messages(
    mut rx: UnboundedReceiver<Message>,
    mut ws_sender: SplitSink<WebSocket, Message>,
) {
    while let Some(msg) = rx.recv().await {
        let closing = matches!(msg, Message::Close(_));
        if let Err(e) = ws_sender.send(msg).await {
            warn!(error = %e, "Failed to send message");
            return;
        }
        if closing {
            break;
        }
    }

    if let Err(e) = ws_sender.close().await {
        debug!(error = %e, "Failed to close socket");
    }
}

pub async fn handle_incoming_messages(
    mut receiver: SplitStream<WebSocket>,
    handler: &mut ConnectionHandler,
) -> Result<(), RelayError> {
    while let Some(message) = receiver.next().await {
        let message = message.map_err(|e| RelayError::Transport(e.to_string()))?;
        if handle_message(message, handler).await?.is_break() {
            break;
        }
    }
    Ok(())
}

pub async fn handle_message(
    message: Message,
    handler: &mut ConnectionHandler,
) -> Result<ControlFlow<()>, RelayError> {
    match message {
        Message::Text(text) => handler.handle_text(&text).await?,
        Message::Binary(bytes) => handler.handle_binary(&bytes).await?,
        Message::Close(frame) => {
            debug!(?frame, "Client sent close");
            return Ok(ControlFlow::Break(()));
        }
        // Pings are answered by the transport.
        Message::Ping(_) | Message::Pong(_) => {}
    }
    Ok(ControlFlow::Continue(()))
}
