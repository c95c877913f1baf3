//! Forum (broadcast) messages.

use crate::state::AppState;
use crate::ws::broadcast::{broadcast_to_all_except, send_frame};
use crate::ws::wire::ServerMessage;
use crate::ws::ConnectionSender;

/// Fan a forum message out to every registered connection except the
/// sender's own, then confirm to the sender.
pub fn handle_forum(state: &AppState, tx: &ConnectionSender, sender_id: &str, text: &str) {
    tracing::info!(from = %sender_id, "Forum message");

    broadcast_to_all_except(
        &state.clients,
        tx,
        &ServerMessage::Forum {
            from: sender_id.to_string(),
            text: text.to_string(),
        },
    );

    send_frame(
        tx,
        &ServerMessage::Ack {
            text: "Forum message sent".to_string(),
        },
    );
}
