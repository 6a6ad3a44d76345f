//! # In-process event bus over a broadcast channel.
//!
//! [`MemoryBus`] is a thin wrapper around [`tokio::sync::broadcast`] that
//! implements [`EventBus`] without any external transport.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits for receivers.
//! - **Fire-and-forget**: no receivers at send time is not an error; the
//!   message is simply dropped.
//! - **Bounded capacity**: a single ring buffer is shared by all receivers;
//!   slow receivers observe `RecvError::Lagged(n)` and skip `n` items.
//! - **Cloneable**: cheap to clone (holds an `Arc`-backed sender).

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::BusError;

use super::EventBus;

/// One published message: subject plus raw payload.
#[derive(Clone, Debug, PartialEq)]
pub struct BusMessage {
    /// Subject the payload was published under.
    pub subject: String,
    /// Serialized event payload.
    pub payload: Vec<u8>,
}

/// Broadcast-channel bus for tests and single-process deployments.
#[derive(Clone, Debug)]
pub struct MemoryBus {
    tx: broadcast::Sender<BusMessage>,
}

impl MemoryBus {
    /// Creates a bus with the given ring-buffer capacity (minimum 1, clamped).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Creates a new receiver observing messages published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.tx.subscribe()
    }

    /// Number of currently attached receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EventBus for MemoryBus {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        // send fails only when there are no receivers; that is fine here
        let _ = self.tx.send(BusMessage {
            subject: subject.to_string(),
            payload,
        });
        Ok(())
    }
}
