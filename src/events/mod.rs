//! Registry change events: records and wire envelopes.
//!
//! This module groups the event **data model** the broker fans out and the
//! bootstrap publishers serialize to the external bus.
//!
//! ## Contents
//! - [`ApplicationRecord`], [`ApplicationEventKind`], [`ApplicationEvent`]
//! - [`EndpointRecord`], [`EndpointEventKind`], [`EndpointEvent`]
//!
//! ## Rules
//! - Field-level entity models live **outside** this crate; records carry the
//!   entity id plus an opaque JSON `details` value the registry supplies.
//! - Envelopes serialize with camelCase keys and skip absent fields, so the
//!   wire shape stays `{"eventType": ..., "id": ..., "application": ...}`.

mod application;
mod endpoint;

pub use application::{ApplicationEvent, ApplicationEventKind, ApplicationRecord};
pub use endpoint::{EndpointEvent, EndpointEventKind, EndpointRecord};
