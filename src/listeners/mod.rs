//! Listener capabilities, one per entity kind.
//!
//! A broker is polymorphic over a listener capability: the set of async
//! handlers a subscriber must implement to receive change notifications for
//! one entity kind. Concrete brokers differ **only** in which capability they
//! parametrize on; the dispatch machinery in [`broker`](crate::broker) is
//! shared.
//!
//! ## Architecture
//! ```text
//! registry mutation ──► EventBroker<dyn ApplicationListener>::notify_all
//!                             │
//!                             ├──► ApplicationEventPublisher (bootstrap, "v2")
//!                             ├──► ad-hoc subscriber A
//!                             └──► ad-hoc subscriber B
//! ```
//!
//! ## Rules
//! - Handlers receive the caller's cancellation token; they may shorten their
//!   own work on cancellation but are never forcibly aborted.
//! - Handlers must tolerate interleaved invocations from concurrent
//!   notification rounds.
//! - A handler's error is isolated to that listener for that round.
//!
//! ## Implementing a listener
//! ```no_run
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use regbus::{ApplicationListener, ApplicationRecord, ListenerError};
//!
//! struct AuditLog;
//!
//! #[async_trait]
//! impl ApplicationListener for AuditLog {
//!     async fn on_application_new(
//!         &self,
//!         _ctx: &CancellationToken,
//!         app: &ApplicationRecord,
//!     ) -> Result<(), ListenerError> {
//!         println!("application registered: {}", app.id);
//!         Ok(())
//!     }
//!     // remaining handlers keep the default no-op behavior
//! }
//! ```

mod application;
mod endpoint;

pub use application::ApplicationListener;
pub use endpoint::EndpointListener;
