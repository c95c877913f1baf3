//! Connection registry: binds a user id to its live connection.
//!
//! At most one connection is reachable per user id at any time. A later
//! registration for the same id silently supersedes the mapping
//! (last-register-wins); the prior connection is not closed, it simply
//! becomes unreachable by user id until its own teardown.

use dashmap::DashMap;

use super::ConnectionSender;

/// user_id -> outbound queue sender for that user's registered connection.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: DashMap<String, ConnectionSender>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Install or overwrite the mapping for `user_id`. No validation of the
    /// id is performed beyond overwrite semantics.
    pub fn register(&self, user_id: &str, tx: ConnectionSender) {
        let superseded = self.clients.insert(user_id.to_string(), tx).is_some();
        tracing::info!(user_id = %user_id, superseded, "User registered");
    }

    /// Look up the registered connection for `user_id`, if any.
    pub fn lookup(&self, user_id: &str) -> Option<ConnectionSender> {
        self.clients.get(user_id).map(|entry| entry.value().clone())
    }

    /// Remove the mapping for `user_id`. No-op if absent.
    pub fn unregister(&self, user_id: &str) {
        if self.clients.remove(user_id).is_some() {
            tracing::debug!(user_id = %user_id, "User unregistered");
        }
    }

    /// Remove the mapping for `user_id` only if it still points at `tx`.
    ///
    /// Called during connection teardown. The guard keeps a superseded
    /// connection's late close from evicting the registration that
    /// replaced it.
    pub fn unregister_connection(&self, user_id: &str, tx: &ConnectionSender) {
        let removed = self
            .clients
            .remove_if(user_id, |_, current| current.same_channel(tx))
            .is_some();
        tracing::debug!(user_id = %user_id, removed, "Connection unregistered");
    }

    /// Visit every registered connection. Used for forum fan-out.
    pub fn for_each<F: FnMut(&str, &ConnectionSender)>(&self, mut f: F) {
        for entry in self.clients.iter() {
            f(entry.key(), entry.value());
        }
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
