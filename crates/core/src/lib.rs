//! `eventlogger-core` — shared primitives for structured event publishing.
//!
//! This crate holds the **pure** building blocks (no transport, no globals):
//! error taxonomy, identifiers and the open `Level` tag.

pub mod error;
pub mod id;
pub mod level;

pub use error::{ConfigError, EnvelopeError, EnvelopeResult, FacadeError, TransportError};
pub use id::{CorrelationId, EventId};
pub use level::Level;
