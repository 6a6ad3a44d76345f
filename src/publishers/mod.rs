//! Bootstrap bus publishers and per-kind broker constructors.
//!
//! The bootstrap publisher is the broker's permanent, privileged subscriber:
//! it is pre-registered under the reserved [`PROTOCOL_V2`](crate::PROTOCOL_V2)
//! token at construction time and forwards every event to the external bus
//! under that version's subject. It implements the same listener capability
//! as any ad-hoc subscriber; dispatch does not treat it specially.
//!
//! ## Architecture
//! ```text
//! notify_all ──► ApplicationEventPublisher ──► serde_json ──► EventBus
//!                      ("v2" token)              envelope      v2 subject
//! ```
//!
//! [`application_broker`] and [`endpoint_broker`] are the construction points
//! registry services use: bus handle in, optional scheduler in, broker with
//! its v2 publisher already seated out.

mod application;
mod endpoint;

use std::sync::Arc;

use crate::broker::{BrokerBuilder, EventBroker, PROTOCOL_V2};
use crate::bus::EventBus;
use crate::listeners::{ApplicationListener, EndpointListener};
use crate::scheduler::Schedule;

pub use application::{ApplicationEventPublisher, APPLICATION_EVENTS_V2};
pub use endpoint::{EndpointEventPublisher, ENDPOINT_EVENTS_V2};

/// Builds the application broker with its v2 bus publisher pre-registered.
pub fn application_broker<B: EventBus>(
    bus: Arc<B>,
    scheduler: Option<Arc<dyn Schedule>>,
) -> Arc<EventBroker<dyn ApplicationListener>> {
    let publisher: Arc<dyn ApplicationListener> = Arc::new(ApplicationEventPublisher::new(bus));
    let mut builder = BrokerBuilder::new().with_version(PROTOCOL_V2, publisher);
    if let Some(scheduler) = scheduler {
        builder = builder.with_scheduler(scheduler);
    }
    builder.build()
}

/// Builds the endpoint broker with its v2 bus publisher pre-registered.
pub fn endpoint_broker<B: EventBus>(
    bus: Arc<B>,
    scheduler: Option<Arc<dyn Schedule>>,
) -> Arc<EventBroker<dyn EndpointListener>> {
    let publisher: Arc<dyn EndpointListener> = Arc::new(EndpointEventPublisher::new(bus));
    let mut builder = BrokerBuilder::new().with_version(PROTOCOL_V2, publisher);
    if let Some(scheduler) = scheduler {
        builder = builder.with_scheduler(scheduler);
    }
    builder.build()
}
