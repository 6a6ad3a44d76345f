//! # v2 endpoint event publisher.
//!
//! Endpoint-side twin of the application publisher: serialized
//! [`EndpointEvent`] envelopes under the fixed v2 subject.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::bus::EventBus;
use crate::error::ListenerError;
use crate::events::{EndpointEvent, EndpointEventKind, EndpointRecord};
use crate::listeners::EndpointListener;

/// Subject endpoint change events are published under.
pub const ENDPOINT_EVENTS_V2: &str = "v2/endpoints/events";

/// Bootstrap publisher forwarding endpoint events to the bus.
pub struct EndpointEventPublisher<B> {
    bus: Arc<B>,
}

impl<B: EventBus> EndpointEventPublisher<B> {
    /// Creates the publisher over a shared bus handle.
    pub fn new(bus: Arc<B>) -> Self {
        Self { bus }
    }

    async fn forward(
        &self,
        kind: EndpointEventKind,
        record: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        let event = EndpointEvent::from_record(kind, record);
        let payload = serde_json::to_vec(&event)?;
        self.bus.publish(ENDPOINT_EVENTS_V2, payload).await?;
        Ok(())
    }
}

#[async_trait]
impl<B: EventBus> EndpointListener for EndpointEventPublisher<B> {
    async fn on_endpoint_new(
        &self,
        _ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        self.forward(EndpointEventKind::New, endpoint).await
    }

    async fn on_endpoint_activated(
        &self,
        _ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        self.forward(EndpointEventKind::Activated, endpoint).await
    }

    async fn on_endpoint_deactivated(
        &self,
        _ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        self.forward(EndpointEventKind::Deactivated, endpoint).await
    }

    async fn on_endpoint_updated(
        &self,
        _ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        self.forward(EndpointEventKind::Updated, endpoint).await
    }

    async fn on_endpoint_deleted(
        &self,
        _ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        self.forward(EndpointEventKind::Deleted, endpoint).await
    }
}
