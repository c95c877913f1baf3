//! Per-frame dispatch.
//!
//! Decodes an inbound text frame and routes it to the matching handler.
//! Every handler is a bounded sequence of map operations plus best-effort
//! sends; nothing here suspends or blocks on a peer. Malformed or
//! unrecognized frames get a reply on the same connection and never close it.

use crate::chat::{dm, forum};
use crate::meeting::signaling;
use crate::state::AppState;
use crate::ws::broadcast::send_frame;
use crate::ws::wire::{self, ClientMessage, ServerMessage};
use crate::ws::ConnectionSender;

/// Recoverable protocol errors. Each is surfaced once to the sender as an
/// `error` frame and never closes the connection or stops the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Frame not decodable in any supported encoding.
    InvalidFormat,
    /// Structured frame with an absent or unrecognized `type`.
    UnknownType,
    /// DM recipient has no registered connection.
    RecipientUnreachable,
    /// Signal relay addressed a meeting that does not exist.
    MeetingNotFound,
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::InvalidFormat => write!(f, "Invalid message format"),
            DispatchError::UnknownType => write!(f, "Unknown message type"),
            DispatchError::RecipientUnreachable => write!(f, "Recipient not connected"),
            DispatchError::MeetingNotFound => write!(f, "Meeting not found"),
        }
    }
}

/// Reply to the sender with an `error` frame.
pub fn send_error(tx: &ConnectionSender, err: DispatchError) {
    send_frame(
        tx,
        &ServerMessage::Error {
            text: err.to_string(),
        },
    );
}

/// Handle one inbound text frame for a connection.
///
/// `bound_user` is the connection's advisory identity; a `register` frame
/// binds it. All other frames carry their sender id per-message and work on
/// anonymous connections too.
pub fn handle_frame(
    raw: &str,
    tx: &ConnectionSender,
    state: &AppState,
    bound_user: &mut Option<String>,
) {
    let message = match wire::parse(raw) {
        Ok(message) => message,
        Err(err) => {
            tracing::debug!(error = %err, "Undecodable frame");
            send_error(tx, DispatchError::InvalidFormat);
            return;
        }
    };

    match message {
        ClientMessage::Register { user_id } => {
            state.clients.register(&user_id, tx.clone());
            *bound_user = Some(user_id);
            send_frame(
                tx,
                &ServerMessage::Ack {
                    text: "You are now registered for direct messaging".to_string(),
                },
            );
        }
        ClientMessage::CreateMeeting { user_id } => {
            signaling::handle_create_meeting(state, tx, &user_id);
        }
        ClientMessage::JoinMeeting {
            user_id,
            meeting_id,
        } => {
            signaling::handle_join_meeting(state, tx, &user_id, &meeting_id);
        }
        ClientMessage::LeaveMeeting {
            user_id,
            meeting_id,
        } => {
            signaling::handle_leave_meeting(state, tx, &user_id, &meeting_id);
        }
        ClientMessage::Dm {
            user_id,
            recipient_id,
            text,
        } => {
            dm::handle_dm(state, tx, &user_id, &recipient_id, &text);
        }
        ClientMessage::Forum { user_id, text } => {
            forum::handle_forum(state, tx, &user_id, &text);
        }
        ClientMessage::WebrtcOffer {
            user_id,
            meeting_id,
            signal_data,
        } => {
            let relay = ServerMessage::WebrtcOffer {
                from: user_id.clone(),
                signal_data,
            };
            signaling::handle_signal_relay(state, tx, &user_id, &meeting_id, &relay);
        }
        ClientMessage::WebrtcAnswer {
            user_id,
            meeting_id,
            signal_data,
        } => {
            let relay = ServerMessage::WebrtcAnswer {
                from: user_id.clone(),
                signal_data,
            };
            signaling::handle_signal_relay(state, tx, &user_id, &meeting_id, &relay);
        }
        ClientMessage::WebrtcCandidate {
            user_id,
            meeting_id,
            signal_data,
        } => {
            let relay = ServerMessage::WebrtcCandidate {
                from: user_id.clone(),
                signal_data,
            };
            signaling::handle_signal_relay(state, tx, &user_id, &meeting_id, &relay);
        }
        ClientMessage::VideoCall {
            user_id,
            meeting_id,
            signal_data,
        } => {
            let relay = ServerMessage::VideoCall {
                from: user_id.clone(),
                signal_data,
            };
            signaling::handle_signal_relay(state, tx, &user_id, &meeting_id, &relay);
        }
        ClientMessage::Unknown => {
            send_error(tx, DispatchError::UnknownType);
        }
    }
}
