//! Error types used by the broker and its boundaries.
//!
//! This module defines three error enums:
//!
//! - [`ListenerError`] — a single listener's delivery failure. Always isolated
//!   per listener; it never aborts delivery to other listeners in the round.
//! - [`NotifyError`] — the aggregate outcome of one inline notification round.
//! - [`BusError`] — a failure at the external bus boundary.
//!
//! Scheduler rejection is deliberately **not** represented here: declining
//! work is a normal signalled outcome (see [`Schedule`](crate::Schedule)),
//! not an error. Registration and unregistration define no errors at all;
//! both are total and idempotent.
//!
//! All types provide `as_label()` returning a short stable snake_case label
//! for logs/metrics.

use thiserror::Error;

/// # Failure delivering one event to one listener.
///
/// Raised inside a listener's handler or by the bootstrap publisher while
/// serializing/publishing to the bus. The dispatcher collects these per
/// round; it never lets one of them stop the other listeners.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ListenerError {
    /// Listener-specific delivery failure.
    #[error("delivery failed: {reason}")]
    Delivery {
        /// Human-readable cause supplied by the listener.
        reason: String,
    },

    /// Delivery observed cancellation and stopped early.
    #[error("delivery cancelled")]
    Canceled,

    /// The bootstrap publisher could not publish to the external bus.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// The event envelope could not be serialized.
    #[error("event serialization failed: {0}")]
    Codec(#[from] serde_json::Error),
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Delivery`] from any displayable cause.
    pub fn delivery(reason: impl Into<String>) -> Self {
        ListenerError::Delivery {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Delivery { .. } => "listener_delivery",
            ListenerError::Canceled => "listener_canceled",
            ListenerError::Bus(_) => "listener_bus",
            ListenerError::Codec(_) => "listener_codec",
        }
    }
}

/// # Aggregate outcome of one inline notification round.
///
/// Surfaced to the caller only on the inline fallback path (no scheduler
/// configured, or the scheduler declined the round). On the scheduled path
/// the round's failures go to the tracing sink instead and the caller sees
/// `Ok(())`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NotifyError {
    /// One or more listener deliveries in the round failed.
    #[error("{failed} of {notified} listener deliveries failed")]
    DeliveryFailed {
        /// Number of listeners in the round's snapshot.
        notified: usize,
        /// Number of deliveries that failed.
        failed: usize,
        /// The individual failures, in no particular order.
        errors: Vec<ListenerError>,
    },
}

impl NotifyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            NotifyError::DeliveryFailed { .. } => "notify_delivery_failed",
        }
    }
}

/// # Failure publishing to the external bus.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// The transport rejected or failed the publish.
    #[error("publish to '{subject}' failed: {reason}")]
    Publish {
        /// Subject the payload was addressed to.
        subject: String,
        /// Transport-specific cause.
        reason: String,
    },

    /// The bus is shut down and accepts no further publishes.
    #[error("bus closed")]
    Closed,
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::Publish { .. } => "bus_publish",
            BusError::Closed => "bus_closed",
        }
    }
}
