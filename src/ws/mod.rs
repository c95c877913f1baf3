pub mod actor;
pub mod broadcast;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod wire;

use tokio::sync::mpsc;

/// Type alias for the sender half of a WebSocket connection's outbound queue.
/// Other parts of the system clone this to push frames to a specific client.
pub type ConnectionSender = mpsc::Sender<axum::extract::ws::Message>;

/// Capacity of each connection's outbound queue. When the queue is full
/// (slow or stalled peer), new frames for that connection are dropped so
/// delivery to other peers is never delayed.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;
