//! Broker core: listener registry, subscriptions, fan-out dispatch.
//!
//! One [`EventBroker`] exists per entity kind; all of them share this
//! implementation and differ only in the listener capability they are
//! parametrized on.
//!
//! Internal modules:
//! - [`registry`]: token-keyed concurrent listener map;
//! - [`subscription`]: the disposer handle returned by `register`;
//! - [`core`]: the broker itself and its dispatch logic;
//! - [`builder`]: construction with reserved-token publishers.

mod builder;
mod core;
mod registry;
mod subscription;

use futures::future::BoxFuture;

use crate::error::ListenerError;

pub use builder::BrokerBuilder;
pub use core::EventBroker;
pub use subscription::Subscription;

/// Reserved token of the v2 bootstrap publisher.
///
/// Present in every broker for its entire lifetime; never returned to a
/// caller, so no disposer can remove it.
pub const PROTOCOL_V2: &str = "v2";

/// Async delivery of one event to one listener.
pub type Delivery = BoxFuture<'static, Result<(), ListenerError>>;
