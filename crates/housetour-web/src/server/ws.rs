//! WebSocket — stream tour events to connected clients, accept key and
//! pointer input back.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info};

use housetour_core::events::TourEvent;
use housetour_core::tour::TourInput;

use super::api::{KeyRequest, PointerRequest};
use super::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(ws_handler))
}

/// Messages a client may send over the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    Key(KeyRequest),
    Pointer(PointerRequest),
}

impl ClientMessage {
    fn into_input(self) -> Option<TourInput> {
        match self {
            ClientMessage::Key(req) => req.into_input(),
            ClientMessage::Pointer(req) => Some(req.into_input()),
        }
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn send_event(socket: &mut WebSocket, event: &TourEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            error!("Failed to serialize event: {}", e);
            true
        }
    }
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let mut rx = state.events.subscribe();

    info!("WebSocket client connected");

    // Start the client off with the current frame
    let current = TourEvent::View(state.view.borrow().clone());
    if !send_event(&mut socket, &current).await {
        return;
    }

    loop {
        tokio::select! {
            // Tour events -> client
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if !send_event(&mut socket, &event).await {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        info!("WebSocket lagged {} events", n);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            // Client input -> tour
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(message) => {
                                if let Some(input) = message.into_input() {
                                    if state.input_tx.send(input).await.is_err() {
                                        break;
                                    }
                                }
                            }
                            Err(e) => debug!("Ignoring client message: {}", e),
                        }
                    }
                    Some(Ok(_)) => {} // ping/pong/binary
                    _ => break,       // disconnected or error
                }
            }
        }
    }

    info!("WebSocket client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages() {
        let key: ClientMessage =
            serde_json::from_str(r#"{"type": "key", "key": "d", "pressed": false}"#).unwrap();
        assert_eq!(key.into_input(), Some(TourInput::KeyUp("d".into())));

        let pointer: ClientMessage =
            serde_json::from_str(r#"{"type": "pointer", "x": 10, "y": 20}"#).unwrap();
        assert_eq!(
            pointer.into_input(),
            Some(TourInput::PointerDown { x: 10.0, y: 20.0 })
        );

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "chat"}"#).is_err());
    }
}
