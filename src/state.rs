use std::sync::Arc;

use crate::meeting::state::MeetingState;
use crate::ws::registry::ClientRegistry;

/// Shared application state passed to all handlers via axum State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Registered WebSocket connections, one reachable per user id
    pub clients: Arc<ClientRegistry>,
    /// Live meeting membership
    pub meetings: Arc<MeetingState>,
    /// Base URL used to build client-facing meeting join links
    pub public_url: String,
}

impl AppState {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            clients: Arc::new(ClientRegistry::new()),
            meetings: Arc::new(MeetingState::new()),
            public_url: public_url.into(),
        }
    }

    /// Client-facing join link for a meeting id.
    pub fn meeting_link(&self, meeting_id: &str) -> String {
        format!(
            "{}/meeting/{}",
            self.public_url.trim_end_matches('/'),
            meeting_id
        )
    }
}
