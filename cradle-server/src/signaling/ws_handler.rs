use crate::AppState;
use crate::signaling::ConnectionLifecycle;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tracing::{error, info};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let lifecycle = state.lifecycle.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, lifecycle))
}

async fn handle_socket(socket: WebSocket, lifecycle: ConnectionLifecycle) {
    let (mut session, mut outbound) = lifecycle.open();
    let peer_id = session.id();
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(envelope) = outbound.recv().await {
            let text = match envelope.encode() {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to encode {} for {}: {}", envelope.kind(), peer_id, e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Frames are handled inline so one connection's frames are routed strictly in order.
    loop {
        tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    lifecycle.on_frame(&mut session, text.as_str());
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            _ = &mut send_task => break,
        }
    }

    send_task.abort();
    lifecycle.on_close(&mut session);
    info!("WebSocket disconnected: {}", peer_id);
}
