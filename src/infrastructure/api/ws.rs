use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};

use super::ApiState;
use crate::infrastructure::hub::HubHandle;

pub async fn ws_handler(State(state): State<ApiState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| forward_events(socket, state.hub))
}

/// Push every hub event to the socket as a JSON text frame until either
/// side goes away. Client frames are read and discarded.
async fn forward_events(socket: WebSocket, hub: HubHandle) {
    let Some(mut observer) = hub.register().await else {
        tracing::warn!("Notification hub is gone, closing websocket");
        return;
    };
    tracing::info!("Websocket observer {} connected", observer.id);

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = observer.events.recv() => {
                // None: the hub dropped this observer for falling behind
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!("Failed to encode event: {}", e);
                        continue;
                    }
                };
                if sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    let _ = sender.send(Message::Close(None)).await;
    hub.unregister(observer.id);
    tracing::info!("Websocket observer {} disconnected", observer.id);
}
