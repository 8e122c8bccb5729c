//! Caller-facing description of one event.

use serde_json::Value as JsonValue;

/// Call arguments for a single event (everything except the level).
///
/// Constructed via [`EventRequest::new`] and enriched with the builder
/// methods; only `event_type` is required.
///
/// ```ignore
/// logger.info(
///     EventRequest::new("signup")
///         .data(json!({ "user": "abc" }))
///         .correlation_id(request_id),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRequest {
    pub(crate) event_type: String,
    pub(crate) data: Option<JsonValue>,
    pub(crate) actor: Option<JsonValue>,
    pub(crate) service: Option<String>,
    pub(crate) correlation_id: Option<String>,
}

impl EventRequest {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            ..Self::default()
        }
    }

    /// Event-specific payload; must be a JSON object (or `null`).
    pub fn data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    /// Who triggered the event; must be a JSON object (or `null`).
    pub fn actor(mut self, actor: JsonValue) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Override the facade's default service name for this event.
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Link this event to an existing causal chain.
    pub fn correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }
}

impl From<&str> for EventRequest {
    fn from(event_type: &str) -> Self {
        Self::new(event_type)
    }
}

impl From<String> for EventRequest {
    fn from(event_type: String) -> Self {
        Self::new(event_type)
    }
}
