//! Wire codec for the signaling protocol.
//!
//! Frames are JSON objects discriminated by a `type` field, in both
//! directions. Fields missing for a known type default to empty rather than
//! failing the frame. A frame that parses as JSON but carries no usable
//! `type` (or an unrecognized one) decodes to [`ClientMessage::Unknown`];
//! anything that is not JSON at all is a [`ParseError`].
//!
//! The original clients also spoke a colon-delimited shorthand
//! (`register:<userId>`, `forum:<userId>:<text>`). It is accepted on input
//! for compatibility but never emitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed inbound frame.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Register {
        #[serde(default)]
        user_id: String,
    },
    CreateMeeting {
        #[serde(default)]
        user_id: String,
    },
    JoinMeeting {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        meeting_id: String,
    },
    LeaveMeeting {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        meeting_id: String,
    },
    /// Direct message. `sendMessage` is the historical name for this frame.
    #[serde(alias = "sendMessage")]
    Dm {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        recipient_id: String,
        #[serde(default)]
        text: String,
    },
    Forum {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        text: String,
    },
    WebrtcOffer {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        meeting_id: String,
        #[serde(default)]
        signal_data: Value,
    },
    WebrtcAnswer {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        meeting_id: String,
        #[serde(default)]
        signal_data: Value,
    },
    WebrtcCandidate {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        meeting_id: String,
        #[serde(default)]
        signal_data: Value,
    },
    VideoCall {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        meeting_id: String,
        #[serde(default)]
        signal_data: Value,
    },
    /// Structured frame whose `type` is absent or not recognized.
    #[serde(skip)]
    Unknown,
}

/// An outbound frame. Serialized as JSON with the same `type` discriminator
/// shape the clients send.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Plain acknowledgement wrapped in a structured frame.
    Ack { text: String },
    /// Recoverable protocol error, reply-only.
    Error { text: String },
    MeetingCreated { meeting_id: String, link: String },
    ReceiveMessage { from: String, text: String },
    Forum { from: String, text: String },
    WebrtcOffer { from: String, signal_data: Value },
    WebrtcAnswer { from: String, signal_data: Value },
    WebrtcCandidate { from: String, signal_data: Value },
    VideoCall { from: String, signal_data: Value },
}

/// Frame could not be interpreted in any supported encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError;

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid message format")
    }
}

/// Parse a raw text frame into a [`ClientMessage`].
///
/// JSON is tried first; non-JSON input falls back to the legacy shorthand.
pub fn parse(raw: &str) -> Result<ClientMessage, ParseError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => {
            if value.get("type").and_then(Value::as_str).is_none() {
                return Ok(ClientMessage::Unknown);
            }
            // Unrecognized `type` values are a protocol-level Unknown,
            // not a parse failure.
            Ok(serde_json::from_value(value).unwrap_or(ClientMessage::Unknown))
        }
        Err(_) => parse_legacy(raw),
    }
}

/// Parse the colon-delimited legacy shorthand.
fn parse_legacy(raw: &str) -> Result<ClientMessage, ParseError> {
    let (tag, rest) = raw.split_once(':').ok_or(ParseError)?;
    match tag {
        "register" => Ok(ClientMessage::Register {
            user_id: rest.to_string(),
        }),
        "forum" => {
            let (user_id, text) = rest.split_once(':').ok_or(ParseError)?;
            Ok(ClientMessage::Forum {
                user_id: user_id.to_string(),
                text: text.to_string(),
            })
        }
        "dm" => {
            let mut parts = rest.splitn(3, ':');
            let user_id = parts.next().ok_or(ParseError)?;
            let recipient_id = parts.next().ok_or(ParseError)?;
            let text = parts.next().ok_or(ParseError)?;
            Ok(ClientMessage::Dm {
                user_id: user_id.to_string(),
                recipient_id: recipient_id.to_string(),
                text: text.to_string(),
            })
        }
        _ => Err(ParseError),
    }
}

/// Serialize an outbound frame to its JSON wire form.
pub fn serialize(msg: &ServerMessage) -> Option<String> {
    serde_json::to_string(msg).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_register_frame() {
        let msg = parse(r#"{"type":"register","userId":"alice"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Register {
                user_id: "alice".to_string()
            }
        );
    }

    #[test]
    fn parses_dm_and_send_message_alias() {
        let dm = parse(r#"{"type":"dm","userId":"a","recipientId":"b","text":"hi"}"#).unwrap();
        let legacy_name =
            parse(r#"{"type":"sendMessage","userId":"a","recipientId":"b","text":"hi"}"#).unwrap();
        assert_eq!(dm, legacy_name);
        assert_eq!(
            dm,
            ClientMessage::Dm {
                user_id: "a".to_string(),
                recipient_id: "b".to_string(),
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let msg = parse(r#"{"type":"joinMeeting"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::JoinMeeting {
                user_id: String::new(),
                meeting_id: String::new()
            }
        );
    }

    #[test]
    fn webrtc_offer_carries_opaque_signal_data() {
        let msg = parse(
            r#"{"type":"webrtcOffer","userId":"a","meetingId":"m","signalData":{"sdp":"v=0"}}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::WebrtcOffer { signal_data, .. } => {
                assert_eq!(signal_data, json!({"sdp": "v=0"}));
            }
            other => panic!("expected WebrtcOffer, got {:?}", other),
        }
    }

    #[test]
    fn json_without_type_is_unknown() {
        assert_eq!(parse(r#"{"foo":"bar"}"#).unwrap(), ClientMessage::Unknown);
        // Non-string `type` counts as missing.
        assert_eq!(parse(r#"{"type":42}"#).unwrap(), ClientMessage::Unknown);
    }

    #[test]
    fn unrecognized_type_is_unknown() {
        assert_eq!(
            parse(r#"{"type":"teleport","userId":"a"}"#).unwrap(),
            ClientMessage::Unknown
        );
    }

    #[test]
    fn non_json_non_shorthand_is_parse_error() {
        assert_eq!(parse("complete garbage"), Err(ParseError));
        assert_eq!(parse(""), Err(ParseError));
    }

    #[test]
    fn legacy_shorthand_frames() {
        assert_eq!(
            parse("register:alice").unwrap(),
            ClientMessage::Register {
                user_id: "alice".to_string()
            }
        );
        assert_eq!(
            parse("forum:alice:hello there").unwrap(),
            ClientMessage::Forum {
                user_id: "alice".to_string(),
                text: "hello there".to_string()
            }
        );
        assert_eq!(
            parse("dm:alice:bob:hi:with:colons").unwrap(),
            ClientMessage::Dm {
                user_id: "alice".to_string(),
                recipient_id: "bob".to_string(),
                text: "hi:with:colons".to_string()
            }
        );
        // Unknown shorthand tag is malformed, not Unknown.
        assert_eq!(parse("teleport:alice"), Err(ParseError));
    }

    #[test]
    fn serializes_outbound_with_type_discriminator() {
        let frame = serialize(&ServerMessage::ReceiveMessage {
            from: "alice".to_string(),
            text: "hi".to_string(),
        })
        .unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "receiveMessage");
        assert_eq!(value["from"], "alice");
        assert_eq!(value["text"], "hi");
    }

    #[test]
    fn serializes_meeting_created() {
        let frame = serialize(&ServerMessage::MeetingCreated {
            meeting_id: "meeting-1".to_string(),
            link: "http://localhost:3000/meeting/meeting-1".to_string(),
        })
        .unwrap();
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["type"], "meetingCreated");
        assert_eq!(value["meetingId"], "meeting-1");
        assert!(value["link"].as_str().unwrap().ends_with("/meeting/meeting-1"));
    }
}
