//! # regbus
//!
//! **regbus** is a generic in-process event broker for registry change
//! notifications: a device/asset registry calls `notify_all` whenever a
//! tracked entity changes state, and the broker fans the event out to every
//! registered listener — the permanent bus publisher plus any ad-hoc
//! subscribers — optionally offloading delivery to a background scheduler.
//!
//! ## Architecture
//! ```text
//!  registry mutation (add/update/remove entity)
//!        │
//!        ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  EventBroker<L>  (one instance per entity kind)           │
//! │  - ListenerMap: token → Arc<L>  (concurrent, snapshotted) │
//! │  - "v2" bootstrap publisher (reserved token, permanent)   │
//! │  - Option<Arc<dyn Schedule>>  (background offload)        │
//! └──────┬───────────────────────────────┬────────────────────┘
//!        │ scheduler accepts             │ none / declined
//!        ▼                               ▼
//!   background round                inline round
//!   (caller returns at once,        (caller awaits the join,
//!    failures → tracing)             failures → NotifyError)
//!        │                               │
//!        └──────── fan-out / join ───────┘
//!             deliver(listener, ctx) per snapshotted listener,
//!             every branch isolated, round settles when all settle
//!        │
//!        ▼
//!   ApplicationEventPublisher / EndpointEventPublisher ("v2")
//!        │ serde_json envelope
//!        ▼
//!   EventBus (external transport; MemoryBus in-process)
//! ```
//!
//! ## Guarantees
//! - Registration is total and concurrent-safe; every `register` returns a
//!   [`Subscription`] removing exactly that listener, idempotently.
//! - The bootstrap publisher's `"v2"` token lives as long as the broker; no
//!   caller ever holds it.
//! - One listener's failure never stops the others; inline rounds surface an
//!   aggregate [`NotifyError`], scheduled rounds log and move on.
//! - No ordering across listeners within a round, none across rounds; the
//!   caller's `CancellationToken` is propagated into every delivery.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use regbus::{
//!     application_broker, ApplicationRecord, Delivery, MemoryBus, SpawnScheduler,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = Arc::new(MemoryBus::default());
//!     let broker = application_broker(bus, Some(Arc::new(SpawnScheduler::new(64))));
//!
//!     let ctx = CancellationToken::new();
//!     let record = ApplicationRecord::new("app-1");
//!     broker
//!         .notify_all(&ctx, move |listener, ctx| -> Delivery {
//!             let record = record.clone();
//!             Box::pin(async move { listener.on_application_new(&ctx, &record).await })
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

mod broker;
mod bus;
mod error;
mod events;
mod listeners;
mod publishers;
mod scheduler;

// ---- Public re-exports ----

pub use broker::{BrokerBuilder, Delivery, EventBroker, Subscription, PROTOCOL_V2};
pub use bus::{BusMessage, EventBus, MemoryBus};
pub use error::{BusError, ListenerError, NotifyError};
pub use events::{
    ApplicationEvent, ApplicationEventKind, ApplicationRecord, EndpointEvent, EndpointEventKind,
    EndpointRecord,
};
pub use listeners::{ApplicationListener, EndpointListener};
pub use publishers::{
    application_broker, endpoint_broker, ApplicationEventPublisher, EndpointEventPublisher,
    APPLICATION_EVENTS_V2, ENDPOINT_EVENTS_V2,
};
pub use scheduler::{Schedule, SpawnScheduler, Work};
