//! Meeting membership handlers and WebRTC signal relay.
//!
//! The relay never interprets the signaling payload; it forwards the opaque
//! `signalData` to every meeting member except the sender. Join and leave
//! acknowledge only the acting user — existing members learn of a new peer
//! when its first signal arrives. That mirrors the deployed protocol; see
//! DESIGN.md for why it is flagged as a candidate gap rather than changed.

use crate::state::AppState;
use crate::ws::broadcast::{send_frame, send_to_user};
use crate::ws::protocol::{send_error, DispatchError};
use crate::ws::wire::ServerMessage;
use crate::ws::ConnectionSender;

/// Create a meeting with the acting user as sole member; reply with the id
/// and a client-facing join link.
pub fn handle_create_meeting(state: &AppState, tx: &ConnectionSender, user_id: &str) {
    let meeting_id = state.meetings.create(user_id);
    let link = state.meeting_link(&meeting_id);
    send_frame(tx, &ServerMessage::MeetingCreated { meeting_id, link });
}

/// Add the acting user to a meeting, creating it if absent.
pub fn handle_join_meeting(state: &AppState, tx: &ConnectionSender, user_id: &str, meeting_id: &str) {
    state.meetings.join(meeting_id, user_id);
    send_frame(
        tx,
        &ServerMessage::Ack {
            text: format!("Joined meeting: {meeting_id}"),
        },
    );
}

/// Remove the acting user from a meeting; the meeting disappears with its
/// last member.
pub fn handle_leave_meeting(state: &AppState, tx: &ConnectionSender, user_id: &str, meeting_id: &str) {
    state.meetings.leave(meeting_id, user_id);
    send_frame(
        tx,
        &ServerMessage::Ack {
            text: format!("Left meeting: {meeting_id}"),
        },
    );
}

/// Relay a pre-built signaling frame to every member of the meeting except
/// the sender. Members without a registered connection are skipped.
pub fn handle_signal_relay(
    state: &AppState,
    tx: &ConnectionSender,
    sender_id: &str,
    meeting_id: &str,
    relay: &ServerMessage,
) {
    let Some(members) = state.meetings.members_of(meeting_id) else {
        send_error(tx, DispatchError::MeetingNotFound);
        return;
    };

    tracing::debug!(
        from = %sender_id,
        meeting_id = %meeting_id,
        peers = members.len().saturating_sub(1),
        "Relaying signal"
    );

    for member in &members {
        if member != sender_id {
            send_to_user(&state.clients, member, relay);
        }
    }
}
