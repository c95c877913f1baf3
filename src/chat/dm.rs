//! Direct message delivery.

use crate::state::AppState;
use crate::ws::broadcast::{send_frame, send_to_user};
use crate::ws::protocol::{send_error, DispatchError};
use crate::ws::wire::ServerMessage;
use crate::ws::ConnectionSender;

/// Deliver a direct message to the recipient's registered connection.
/// An unreachable recipient is an informational reply, never a failure.
pub fn handle_dm(
    state: &AppState,
    tx: &ConnectionSender,
    sender_id: &str,
    recipient_id: &str,
    text: &str,
) {
    tracing::info!(from = %sender_id, to = %recipient_id, "Direct message");

    let delivered = send_to_user(
        &state.clients,
        recipient_id,
        &ServerMessage::ReceiveMessage {
            from: sender_id.to_string(),
            text: text.to_string(),
        },
    );

    if delivered {
        send_frame(
            tx,
            &ServerMessage::Ack {
                text: "DM sent successfully".to_string(),
            },
        );
    } else {
        send_error(tx, DispatchError::RecipientUnreachable);
    }
}
