//! The wire-level event record and its JSON encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventlogger_core::{CorrelationId, EnvelopeError, EnvelopeResult, EventId, Level};

/// Canonical, fully flattened event record.
///
/// This is the unit that goes on the wire. Every field is a scalar: `actor`
/// and `data` are carried as JSON object *text*, so the payload maps 1:1 onto
/// a fixed downstream table schema.
///
/// Notes:
/// - Built fresh for every publish call and never mutated afterwards.
/// - `created_at` is serialized as RFC 3339 UTC with a `Z` suffix
///   (never `+00:00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    event_id: EventId,
    correlation_id: CorrelationId,
    service: String,
    event_type: String,
    level: Level,
    environment: String,

    #[serde(with = "utc_z")]
    created_at: DateTime<Utc>,

    /// JSON object text, `"{}"` when absent.
    actor: String,
    /// JSON object text, `"{}"` when absent.
    data: String,
}

impl EventEnvelope {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        event_id: EventId,
        correlation_id: CorrelationId,
        service: String,
        event_type: String,
        level: Level,
        environment: String,
        created_at: DateTime<Utc>,
        actor: String,
        data: String,
    ) -> Self {
        Self {
            event_id,
            correlation_id,
            service,
            event_type,
            level,
            environment,
            created_at,
            actor,
            data,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `created_at` in its wire form.
    pub fn created_at_string(&self) -> String {
        utc_z::format(&self.created_at)
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Encode as the UTF-8 JSON transport payload.
    pub fn to_payload(&self) -> EnvelopeResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| EnvelopeError::serialization(e.to_string()))
    }

    /// Decode a transport payload (downstream consumers, tests).
    pub fn from_payload(bytes: &[u8]) -> EnvelopeResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| EnvelopeError::serialization(e.to_string()))
    }
}

/// RFC 3339 UTC timestamps with microsecond precision and a `Z` suffix.
pub(crate) mod utc_z {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
