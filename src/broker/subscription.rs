//! # Subscription handle.
//!
//! [`Subscription`] is the disposer returned by
//! [`EventBroker::register`](super::EventBroker::register). It captures the
//! generated token and a weak reference to the broker's own listener map.
//!
//! ## Rules
//! - `unsubscribe()` removes exactly the captured entry.
//! - Calling it twice, or after the broker is gone, is a silent no-op.
//! - A subscription can never affect a different broker: it points at the
//!   map it was issued from and nowhere else.
//! - Dropping a subscription does **not** unsubscribe; removal is always an
//!   explicit call, so handles can be stored or forgotten freely.

use std::sync::Weak;

use super::registry::ListenerMap;

/// Disposer for one registered listener.
pub struct Subscription<L: ?Sized> {
    map: Weak<ListenerMap<L>>,
    token: String,
}

impl<L: ?Sized> Subscription<L> {
    pub(crate) fn new(map: Weak<ListenerMap<L>>, token: String) -> Self {
        Self { map, token }
    }

    /// Removes the associated listener from its broker.
    ///
    /// Idempotent: repeated calls, calls racing a notification round, and
    /// calls after the broker has been dropped all succeed silently.
    pub async fn unsubscribe(&self) {
        if let Some(map) = self.map.upgrade() {
            map.remove(&self.token).await;
        }
    }

    /// The opaque token this subscription was registered under.
    ///
    /// Exposed for logging/diagnostics only; tokens are not portable across
    /// brokers.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl<L: ?Sized> std::fmt::Debug for Subscription<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .finish()
    }
}
