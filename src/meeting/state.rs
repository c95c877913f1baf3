//! In-memory meeting membership state.
//!
//! Tracks which users are in which meetings using a DashMap for concurrent
//! access. A meeting exists exactly as long as it has members: it is created
//! implicitly on first join and removed under the same entry lock the moment
//! its member set empties.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// meeting_id -> member user ids.
#[derive(Debug, Default)]
pub struct MeetingState {
    meetings: DashMap<String, HashSet<String>>,
    /// Disambiguates ids generated within the same millisecond.
    seq: AtomicU64,
}

impl MeetingState {
    pub fn new() -> Self {
        Self {
            meetings: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// Create a new meeting with `user_id` as its sole member and return the
    /// generated id. Ids are unique for the lifetime of the process.
    pub fn create(&self, user_id: &str) -> String {
        let meeting_id = format!(
            "meeting-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            self.seq.fetch_add(1, Ordering::Relaxed)
        );
        self.meetings
            .insert(meeting_id.clone(), HashSet::from([user_id.to_string()]));
        tracing::info!(meeting_id = %meeting_id, user_id = %user_id, "Meeting created");
        meeting_id
    }

    /// Add `user_id` to a meeting, creating it if absent. Re-joining is a
    /// no-op, not an error.
    pub fn join(&self, meeting_id: &str, user_id: &str) {
        self.meetings
            .entry(meeting_id.to_string())
            .or_default()
            .insert(user_id.to_string());
        tracing::info!(meeting_id = %meeting_id, user_id = %user_id, "User joined meeting");
    }

    /// Remove `user_id` from a meeting if it exists. A meeting left empty is
    /// deleted within the same entry lock.
    pub fn leave(&self, meeting_id: &str, user_id: &str) {
        if let Entry::Occupied(mut occupied) = self.meetings.entry(meeting_id.to_string()) {
            occupied.get_mut().remove(user_id);
            if occupied.get().is_empty() {
                occupied.remove();
                tracing::debug!(meeting_id = %meeting_id, "Empty meeting removed");
            }
        }
        tracing::info!(meeting_id = %meeting_id, user_id = %user_id, "User left meeting");
    }

    /// Current members of a meeting, or None if the meeting does not exist.
    pub fn members_of(&self, meeting_id: &str) -> Option<Vec<String>> {
        self.meetings
            .get(meeting_id)
            .map(|entry| entry.value().iter().cloned().collect())
    }

    /// Remove `user_id` from every meeting it is a member of, deleting any
    /// meeting left empty. Runs synchronously during connection teardown;
    /// this is the only operation that scans all meetings.
    pub fn purge_user(&self, user_id: &str) {
        // Collect ids first to avoid holding iterator locks during mutation.
        let meeting_ids: Vec<String> = self.meetings.iter().map(|e| e.key().clone()).collect();

        for meeting_id in meeting_ids {
            if let Entry::Occupied(mut occupied) = self.meetings.entry(meeting_id.clone()) {
                if occupied.get_mut().remove(user_id) {
                    tracing::debug!(
                        meeting_id = %meeting_id,
                        user_id = %user_id,
                        "User purged from meeting"
                    );
                }
                if occupied.get().is_empty() {
                    occupied.remove();
                    tracing::debug!(meeting_id = %meeting_id, "Empty meeting removed");
                }
            }
        }
    }

    /// Number of live meetings.
    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }
}
