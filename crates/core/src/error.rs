//! Error model.

use thiserror::Error;

/// Result type used by envelope construction.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Malformed call arguments, detected while building an envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// A required field was empty (e.g. `event_type`, `level`).
    #[error("validation failed: {0}")]
    Validation(String),

    /// `data` / `actor` must be JSON objects (or absent).
    #[error("field `{field}` must be a JSON object, got {found}")]
    NotAnObject { field: &'static str, found: &'static str },

    /// The envelope could not be encoded to the wire format.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl EnvelopeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Facade construction failure: one or more required settings did not resolve.
///
/// Every missing setting is reported at once, never just the first.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required config for event logger: {}", .missing.join(", "))]
    Missing { missing: Vec<&'static str> },
}

impl ConfigError {
    pub fn missing(missing: Vec<&'static str>) -> Self {
        Self::Missing { missing }
    }

    /// Names of the settings that were absent.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::Missing { missing } => missing,
        }
    }
}

/// Transport-level publish failure.
///
/// Never escapes `publish_event`; it is carried inside the publish outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("quota exceeded: {0}")]
    Quota(String),

    /// The transport went away before confirming a pending publish.
    #[error("publish abandoned before confirmation")]
    Abandoned,

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn quota(msg: impl Into<String>) -> Self {
        Self::Quota(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Errors raised while standing up a facade (config or transport connect).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FacadeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect transport: {0}")]
    Transport(#[from] TransportError),
}
