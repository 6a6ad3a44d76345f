//! # Endpoint listener capability.
//!
//! One async handler per endpoint lifecycle event, including connectivity
//! transitions. All handlers default to no-ops.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ListenerError;
use crate::events::EndpointRecord;

/// Receiver of endpoint change notifications.
///
/// Same contract as [`ApplicationListener`](crate::ApplicationListener):
/// async handlers, isolated failures, tolerance for interleaved rounds.
#[async_trait]
pub trait EndpointListener: Send + Sync + 'static {
    /// Endpoint registered for the first time.
    async fn on_endpoint_new(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, endpoint);
        Ok(())
    }

    /// Endpoint came online.
    async fn on_endpoint_activated(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, endpoint);
        Ok(())
    }

    /// Endpoint went offline.
    async fn on_endpoint_deactivated(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, endpoint);
        Ok(())
    }

    /// Endpoint metadata changed.
    async fn on_endpoint_updated(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, endpoint);
        Ok(())
    }

    /// Endpoint removed from the registry.
    async fn on_endpoint_deleted(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, endpoint);
        Ok(())
    }
}
