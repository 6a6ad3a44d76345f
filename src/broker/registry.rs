//! # Token-keyed listener map.
//!
//! Internal storage behind [`EventBroker`](super::EventBroker): a concurrent
//! map from opaque subscription token to listener reference.
//!
//! ## Rules
//! - Reserved tokens (the bootstrap publishers') are inserted once at
//!   construction and never handed to callers, so no disposer can remove them.
//! - Ad-hoc tokens are freshly generated UUIDs; insertion never fails.
//! - Removal is idempotent; removing an unknown token is a silent no-op.
//! - The lock is never held across an await; dispatch works on a snapshot
//!   taken at the moment notification begins.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Concurrent token → listener map for one broker instance.
pub(crate) struct ListenerMap<L: ?Sized> {
    entries: RwLock<HashMap<String, Arc<L>>>,
}

impl<L: ?Sized> ListenerMap<L> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a listener under a well-known reserved token.
    ///
    /// Construction-time only: takes `&mut self`, so it cannot race with a
    /// shared broker and needs no lock.
    pub(crate) fn insert_reserved(&mut self, token: &str, listener: Arc<L>) {
        self.entries.get_mut().insert(token.to_string(), listener);
    }

    /// Inserts a listener under a freshly generated unique token and
    /// returns the token.
    pub(crate) async fn insert(&self, listener: Arc<L>) -> String {
        let token = Uuid::new_v4().to_string();
        let mut entries = self.entries.write().await;
        entries.insert(token.clone(), listener);
        token
    }

    /// Removes the entry for `token` if present (idempotent).
    pub(crate) async fn remove(&self, token: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(token);
    }

    /// Consistent snapshot of all currently registered listeners.
    pub(crate) async fn snapshot(&self) -> Vec<Arc<L>> {
        let entries = self.entries.read().await;
        entries.values().cloned().collect()
    }

    /// Number of registered listeners (reserved tokens included).
    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
