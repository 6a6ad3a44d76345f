//! # v2 application event publisher.
//!
//! Wraps the external bus handle and forwards every application change as a
//! serialized [`ApplicationEvent`] under the fixed v2 subject.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::bus::EventBus;
use crate::error::ListenerError;
use crate::events::{ApplicationEvent, ApplicationEventKind, ApplicationRecord};
use crate::listeners::ApplicationListener;

/// Subject application change events are published under.
pub const APPLICATION_EVENTS_V2: &str = "v2/applications/events";

/// Bootstrap publisher forwarding application events to the bus.
pub struct ApplicationEventPublisher<B> {
    bus: Arc<B>,
}

impl<B: EventBus> ApplicationEventPublisher<B> {
    /// Creates the publisher over a shared bus handle.
    pub fn new(bus: Arc<B>) -> Self {
        Self { bus }
    }

    async fn forward(
        &self,
        kind: ApplicationEventKind,
        record: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        let event = ApplicationEvent::from_record(kind, record);
        let payload = serde_json::to_vec(&event)?;
        self.bus.publish(APPLICATION_EVENTS_V2, payload).await?;
        Ok(())
    }
}

#[async_trait]
impl<B: EventBus> ApplicationListener for ApplicationEventPublisher<B> {
    async fn on_application_new(
        &self,
        _ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        self.forward(ApplicationEventKind::New, application).await
    }

    async fn on_application_enabled(
        &self,
        _ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        self.forward(ApplicationEventKind::Enabled, application)
            .await
    }

    async fn on_application_disabled(
        &self,
        _ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        self.forward(ApplicationEventKind::Disabled, application)
            .await
    }

    async fn on_application_updated(
        &self,
        _ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        self.forward(ApplicationEventKind::Updated, application)
            .await
    }

    async fn on_application_deleted(
        &self,
        _ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        self.forward(ApplicationEventKind::Deleted, application)
            .await
    }
}
