//! Outbound send helpers.
//!
//! All sends are best-effort `try_send` onto each connection's bounded
//! queue: a stalled peer drops its own frames instead of delaying anyone
//! else's. Nothing is retried or queued for later redelivery.

use axum::extract::ws::Message;

use super::registry::ClientRegistry;
use super::wire::{self, ServerMessage};
use super::ConnectionSender;

/// Push a frame onto one connection's outbound queue.
pub fn send_frame(tx: &ConnectionSender, msg: &ServerMessage) {
    let Some(text) = wire::serialize(msg) else {
        return;
    };
    if tx.try_send(Message::Text(text.into())).is_err() {
        tracing::warn!("Outbound queue full or closed, dropping frame");
    }
}

/// Send a frame to the user's registered connection. Returns false when the
/// user has no registration.
pub fn send_to_user(registry: &ClientRegistry, user_id: &str, msg: &ServerMessage) -> bool {
    match registry.lookup(user_id) {
        Some(tx) => {
            send_frame(&tx, msg);
            true
        }
        None => false,
    }
}

/// Send a frame to every registered connection except `except` itself.
/// Exclusion is by connection, so a sender never hears its own broadcast
/// regardless of which id (if any) it registered under.
pub fn broadcast_to_all_except(
    registry: &ClientRegistry,
    except: &ConnectionSender,
    msg: &ServerMessage,
) {
    registry.for_each(|_, tx| {
        if !tx.same_channel(except) {
            send_frame(tx, msg);
        }
    });
}
