//! External bus boundary.
//!
//! The broker never talks to a transport directly; the bootstrap publishers
//! do, through the [`EventBus`] trait. The trait is the whole contract: a
//! subject plus a serialized payload, accepted or failed.
//!
//! [`MemoryBus`] is the in-process implementation used by tests and by
//! embeddings that have no external transport.

mod memory;

use async_trait::async_trait;

use crate::error::BusError;

pub use memory::{BusMessage, MemoryBus};

/// Opaque publish target for serialized events.
///
/// Implementations wrap whatever transport the deployment uses (AMQP, MQTT,
/// an in-process channel, ...). The broker assumes nothing beyond
/// "publish succeeded or tell me why not".
#[async_trait]
pub trait EventBus: Send + Sync + 'static {
    /// Publishes one serialized payload under `subject`.
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError>;
}
