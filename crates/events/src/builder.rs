//! Envelope construction (pure apart from the clock and the id source).

use chrono::Utc;
use serde_json::Value as JsonValue;

use eventlogger_core::{CorrelationId, EnvelopeError, EnvelopeResult, EventId, Level};

use crate::{EventEnvelope, EventRequest};

/// Per-facade values applied to every envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeDefaults {
    service: String,
    environment: String,
}

impl FacadeDefaults {
    pub fn new(service: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            environment: environment.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }
}

/// Build the canonical envelope for one event.
///
/// - `data` / `actor`: absent or `null` become `"{}"`, objects are serialized
///   compactly, anything else is rejected.
/// - Empty `correlation_id` and blank `service` overrides count as absent.
/// - Blank `event_type` or `level` is rejected.
pub fn build(
    request: &EventRequest,
    level: &Level,
    defaults: &FacadeDefaults,
) -> EnvelopeResult<EventEnvelope> {
    if request.event_type.trim().is_empty() {
        return Err(EnvelopeError::validation("event_type must not be empty"));
    }
    if level.is_blank() {
        return Err(EnvelopeError::validation("level must not be empty"));
    }

    let service = match request.service.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => defaults.service(),
    };
    if service.trim().is_empty() {
        return Err(EnvelopeError::validation("service must not be empty"));
    }

    let actor = object_text("actor", request.actor.as_ref())?;
    let data = object_text("data", request.data.as_ref())?;

    Ok(EventEnvelope::new(
        EventId::new(),
        CorrelationId::or_generate(request.correlation_id.as_deref()),
        service.to_string(),
        request.event_type.clone(),
        level.clone(),
        defaults.environment().to_string(),
        Utc::now(),
        actor,
        data,
    ))
}

fn object_text(field: &'static str, value: Option<&JsonValue>) -> EnvelopeResult<String> {
    match value {
        None | Some(JsonValue::Null) => Ok("{}".to_string()),
        Some(obj @ JsonValue::Object(_)) => {
            serde_json::to_string(obj).map_err(|e| EnvelopeError::serialization(e.to_string()))
        }
        Some(other) => Err(EnvelopeError::NotAnObject {
            field,
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
