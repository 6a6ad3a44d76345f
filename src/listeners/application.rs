//! # Application listener capability.
//!
//! One async handler per application lifecycle event. All handlers default to
//! no-ops so a subscriber only implements the transitions it cares about.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ListenerError;
use crate::events::ApplicationRecord;

/// Receiver of application change notifications.
///
/// Implemented by ad-hoc subscribers and by the bootstrap bus publisher
/// alike; the broker does not distinguish between them at dispatch time.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Isolate failures: return an error instead of panicking.
/// - Expect interleaving: two concurrent rounds may invoke the same handler
///   at the same time.
#[async_trait]
pub trait ApplicationListener: Send + Sync + 'static {
    /// Application registered for the first time.
    async fn on_application_new(
        &self,
        ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, application);
        Ok(())
    }

    /// Application enabled.
    async fn on_application_enabled(
        &self,
        ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, application);
        Ok(())
    }

    /// Application disabled.
    async fn on_application_disabled(
        &self,
        ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, application);
        Ok(())
    }

    /// Application metadata changed.
    async fn on_application_updated(
        &self,
        ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, application);
        Ok(())
    }

    /// Application removed from the registry.
    async fn on_application_deleted(
        &self,
        ctx: &CancellationToken,
        application: &ApplicationRecord,
    ) -> Result<(), ListenerError> {
        let _ = (ctx, application);
        Ok(())
    }
}
