//! Endpoint change events.
//!
//! Mirrors the application side: [`EndpointRecord`] for listeners,
//! [`EndpointEvent`] for the bus envelope. Endpoints additionally report
//! connectivity transitions (activated/deactivated).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of one tracked endpoint, as the registry sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    /// Registry-unique endpoint id.
    pub id: String,
    /// Opaque entity payload supplied by the registry (may be absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl EndpointRecord {
    /// Creates a record with no payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            details: None,
        }
    }

    /// Attaches an opaque entity payload.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Lifecycle event kinds for endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointEventKind {
    /// Endpoint registered for the first time.
    New,
    /// Endpoint came online.
    Activated,
    /// Endpoint went offline.
    Deactivated,
    /// Endpoint metadata changed.
    Updated,
    /// Endpoint removed from the registry.
    Deleted,
}

/// Wire envelope for one endpoint change, published under a fixed
/// protocol version subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointEvent {
    /// What happened to the endpoint.
    pub event_type: EndpointEventKind,
    /// Id of the affected endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entity payload at the time of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Value>,
}

impl EndpointEvent {
    /// Builds the envelope for `kind` from a registry record.
    pub fn from_record(kind: EndpointEventKind, record: &EndpointRecord) -> Self {
        Self {
            event_type: kind,
            id: Some(record.id.clone()),
            endpoint: record.details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connectivity_kinds_round_trip() {
        for kind in [EndpointEventKind::Activated, EndpointEventKind::Deactivated] {
            let wire = serde_json::to_string(&kind).unwrap();
            let back: EndpointEventKind = serde_json::from_str(&wire).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_envelope_uses_endpoint_field() {
        let record = EndpointRecord::new("ep-1").with_details(json!({ "url": "opc.tcp://x" }));
        let event = EndpointEvent::from_record(EndpointEventKind::Activated, &record);
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["endpoint"]["url"], "opc.tcp://x");
        assert!(wire.get("application").is_none());
    }
}
