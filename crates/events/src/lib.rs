//! Structured event publishing.
//!
//! Callers describe an event ([`EventRequest`]), a facade stamps it into a
//! canonical [`EventEnvelope`] and hands the JSON payload to a
//! [`Transport`]. See [`facade`] for the failure model and [`global`] for the
//! process-wide accessor.

pub mod builder;
pub mod config;
pub mod envelope;
pub mod facade;
pub mod global;
pub mod in_memory_transport;
pub mod null;
pub mod request;
pub mod transport;

pub use builder::{FacadeDefaults, build};
pub use config::{ConfigOverrides, ConfigSource, EnvSource, MapSource, PublisherConfig};
pub use envelope::EventEnvelope;
pub use facade::{EventLogger, PublishOutcome, Publication, PublisherFacade};
pub use in_memory_transport::{InMemoryMode, InMemoryTransport, PublishedMessage};
pub use null::NullFacade;
pub use request::EventRequest;
pub use transport::{Delivery, PendingPublish, PublishCompleter, Transport};

pub use eventlogger_core::{
    ConfigError, CorrelationId, EnvelopeError, EventId, FacadeError, Level, TransportError,
};
