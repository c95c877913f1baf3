//! Actor-per-connection lifecycle.
//!
//! Each WebSocket is split into reader and writer halves:
//! - Writer task: owns the sink, forwards frames from the connection's
//!   bounded mpsc queue
//! - Reader loop: decodes incoming frames and dispatches them in arrival
//!   order
//!
//! Any part of the system can reach this client by cloning the queue sender
//! out of the registry. Teardown runs exactly once, whether the close was
//! peer-initiated, local, or a transport error: the registry drops this
//! connection's binding and the bound user (if any) is purged from every
//! meeting.

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, timeout};

use crate::state::AppState;
use crate::ws::protocol;
use crate::ws::{ConnectionSender, OUTBOUND_QUEUE_CAPACITY};

/// Ping interval: server sends a WebSocket ping every 30 seconds so abrupt
/// disconnects cannot leak registry or meeting entries.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Pong timeout: if no pong arrives within 10 seconds of a ping, close.
const PONG_TIMEOUT: Duration = Duration::from_secs(10);

/// Run the connection actor until the peer disconnects or errors.
///
/// The connection starts anonymous; a `register` frame binds its identity.
pub async fn run_connection(socket: WebSocket, state: AppState) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::channel::<Message>(OUTBOUND_QUEUE_CAPACITY);

    tracing::info!("New client connected via WebSocket");

    // Spawn writer task: forwards queued frames to the WebSocket sink
    let writer_handle = tokio::spawn(writer_task(ws_sender, rx));

    // Track pong reception
    let (pong_tx, mut pong_rx) = mpsc::unbounded_channel::<()>();

    // Spawn ping task: periodic pings, close on missing pong
    let ping_tx = tx.clone();
    let ping_handle = tokio::spawn(async move {
        let mut ping_timer = interval(PING_INTERVAL);
        // Skip the first immediate tick
        ping_timer.tick().await;

        loop {
            ping_timer.tick().await;

            if ping_tx
                .try_send(Message::Ping(vec![1, 2, 3, 4].into()))
                .is_err()
            {
                // Writer task has died or the queue is jammed; either way
                // the pong timeout below will end this task.
            }

            match timeout(PONG_TIMEOUT, pong_rx.recv()).await {
                Ok(Some(())) => {
                    // Pong received, continue
                }
                _ => {
                    tracing::warn!("Pong timeout, closing connection");
                    let _ = ping_tx.try_send(Message::Close(Some(CloseFrame {
                        code: 1001,
                        reason: "Pong timeout".into(),
                    })));
                    break;
                }
            }
        }
    });

    // Identity bound by a `register` frame, if the client ever sends one.
    let mut bound_user: Option<String> = None;

    // Reader loop: frames from one connection are handled in arrival order.
    loop {
        match ws_receiver.next().await {
            Some(Ok(msg)) => match msg {
                Message::Text(text) => {
                    protocol::handle_frame(text.as_str(), &tx, &state, &mut bound_user);
                }
                Message::Binary(data) => {
                    // The protocol is JSON text; binary frames are ignored.
                    tracing::debug!(len = data.len(), "Ignoring binary frame");
                }
                Message::Pong(_) => {
                    let _ = pong_tx.send(());
                }
                Message::Ping(data) => {
                    let _ = tx.try_send(Message::Pong(data));
                }
                Message::Close(frame) => {
                    tracing::info!(
                        user_id = bound_user.as_deref().unwrap_or("<anonymous>"),
                        reason = ?frame,
                        "Client initiated close"
                    );
                    break;
                }
            },
            Some(Err(e)) => {
                // Transport errors end this connection only, never the process.
                tracing::warn!(
                    user_id = bound_user.as_deref().unwrap_or("<anonymous>"),
                    error = %e,
                    "WebSocket receive error"
                );
                break;
            }
            None => {
                tracing::info!(
                    user_id = bound_user.as_deref().unwrap_or("<anonymous>"),
                    "WebSocket stream ended"
                );
                break;
            }
        }
    }

    writer_handle.abort();
    ping_handle.abort();

    // Teardown: drop the registry binding and evict the user from every
    // meeting. A connection that never registered has nothing to purge.
    if let Some(user_id) = &bound_user {
        state.clients.unregister_connection(user_id, &tx);
        state.meetings.purge_user(user_id);
    }

    tracing::info!(
        user_id = bound_user.as_deref().unwrap_or("<anonymous>"),
        "WebSocket actor stopped"
    );
}

/// Writer task: drains the connection's queue into the WebSocket sink.
async fn writer_task(
    mut ws_sender: futures_util::stream::SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<Message>,
) {
    while let Some(msg) = rx.recv().await {
        if ws_sender.send(msg).await.is_err() {
            // WebSocket send failed — connection is broken
            break;
        }
    }
}
