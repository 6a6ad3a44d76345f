//! # Broker builder.
//!
//! [`BrokerBuilder`] assembles an [`EventBroker`]: versioned bus publishers
//! go in first under their reserved tokens, the optional scheduler is wired,
//! and only then does `build()` hand out the shared broker. That ordering is
//! what makes the bootstrap invariant hold — no public `register` call is
//! possible before the reserved entries exist.

use std::sync::Arc;

use crate::scheduler::Schedule;

use super::core::EventBroker;
use super::registry::ListenerMap;

/// Builder for an [`EventBroker`] over the listener capability `L`.
pub struct BrokerBuilder<L: ?Sized + Send + Sync + 'static> {
    listeners: ListenerMap<L>,
    scheduler: Option<Arc<dyn Schedule>>,
}

impl<L: ?Sized + Send + Sync + 'static> BrokerBuilder<L> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            listeners: ListenerMap::new(),
            scheduler: None,
        }
    }

    /// Pre-registers a versioned publisher under its reserved `token`.
    ///
    /// Adding a future protocol version means one more call with a new fixed
    /// token; existing publishers are never mutated.
    pub fn with_version(mut self, token: &'static str, publisher: Arc<L>) -> Self {
        self.listeners.insert_reserved(token, publisher);
        self
    }

    /// Wires the background scheduler dispatch may offload rounds to.
    ///
    /// Without one, every `notify_all` runs its round inline.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Schedule>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Builds the shared broker instance.
    pub fn build(self) -> Arc<EventBroker<L>> {
        Arc::new(EventBroker::new_internal(
            Arc::new(self.listeners),
            self.scheduler,
        ))
    }
}

impl<L: ?Sized + Send + Sync + 'static> Default for BrokerBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}
