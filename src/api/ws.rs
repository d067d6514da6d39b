//! WebSocket transport for game sessions
//!
//! Each connection runs three tasks: this handler reads the socket into an
//! inbound queue, the session worker answers one frame at a time, and a
//! writer drains outbound frames into the socket.

use super::AppState;
use crate::game::{ConnectionSession, ServerFrame};
use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

const INBOUND_CAPACITY: usize = 32;
const OUTBOUND_CAPACITY: usize = 64;

/// Drive one upgraded socket until the client goes away
pub async fn handle_socket(socket: WebSocket, state: AppState) {
    let guard = state.sessions.register();
    let conn_id = guard.id();

    let (sink, mut stream) = socket.split();
    let (out_tx, out_rx) = mpsc::channel(OUTBOUND_CAPACITY);
    let (in_tx, in_rx) = mpsc::channel(INBOUND_CAPACITY);
    let cancel = CancellationToken::new();

    let session = ConnectionSession::new(conn_id, state.game.router(), state.game.new_agent(), out_tx);
    tokio::spawn(write_frames(conn_id, sink, out_rx));
    tokio::spawn(session.run(in_rx, cancel.clone()));

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if in_tx.send(text).await.is_err() {
                    break;
                }
            }
            Ok(Message::Binary(data)) => {
                tracing::warn!(conn_id = %conn_id, len = data.len(), "Ignoring binary frame");
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_) | Message::Pong(_)) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Frames not yet started are skipped; an in-flight reply is discarded by
    // the writer once the socket is gone.
    cancel.cancel();
    drop(guard);
}

async fn write_frames(
    conn_id: Uuid,
    mut sink: SplitSink<WebSocket, Message>,
    mut frames: mpsc::Receiver<ServerFrame>,
) {
    while let Some(frame) = frames.recv().await {
        let text = match serde_json::to_string(&frame) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(conn_id = %conn_id, error = %e, "Failed to encode frame");
                continue;
            }
        };
        if let Err(e) = sink.send(Message::Text(text)).await {
            tracing::debug!(conn_id = %conn_id, error = %e, "Send on closed channel");
            break;
        }
    }
    let _ = sink.close().await;
}
