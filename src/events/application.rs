//! Application change events.
//!
//! [`ApplicationRecord`] is what registry logic hands to the broker's
//! listeners; [`ApplicationEvent`] is the versioned envelope the bootstrap
//! publisher puts on the external bus.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of one tracked application, as the registry sees it.
///
/// The broker treats the entity as opaque: `id` identifies it, `details`
/// carries whatever model the registry serializes for its consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Registry-unique application id.
    pub id: String,
    /// Opaque entity payload supplied by the registry (may be absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApplicationRecord {
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

/// Lifecycle event kinds for applications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationEventKind {
    /// Application registered for the first time.
    New,
    /// Application enabled.
    Enabled,
    /// Application disabled.
    Disabled,
    /// Application metadata changed.
    Updated,
    /// Application removed from the registry.
    Deleted,
}

/// Wire envelope for one application change, published under a fixed
/// protocol version subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEvent {
    /// What happened to the application.
    pub event_type: ApplicationEventKind,
    /// Id of the affected application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entity payload at the time of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Value>,
}

impl ApplicationEvent {
    /// Builds the envelope for `kind` from a registry record.
    pub fn from_record(kind: ApplicationEventKind, record: &ApplicationRecord) -> Self {
        Self {
            event_type: kind,
            id: Some(record.id.clone()),
            application: record.details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_skips_absent_fields() {
        let record = ApplicationRecord::new("app-1");
        let event = ApplicationEvent::from_record(ApplicationEventKind::Deleted, &record);
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire, json!({ "eventType": "Deleted", "id": "app-1" }));
    }

    #[test]
    fn test_envelope_carries_entity_payload() {
        let record =
            ApplicationRecord::new("app-2").with_details(json!({ "name": "press-line" }));
        let event = ApplicationEvent::from_record(ApplicationEventKind::New, &record);
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["eventType"], "New");
        assert_eq!(wire["application"]["name"], "press-line");
    }
}
