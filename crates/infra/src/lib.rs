//! Broker-backed transports for `eventlogger-events`.
//!
//! The transport abstraction lives in `eventlogger-events` as pure mechanics.
//! This crate provides infrastructure-backed implementations, each behind a
//! cargo feature so the default build pulls in no client libraries.

#[cfg(feature = "redis")]
pub mod redis_pubsub;

#[cfg(feature = "redis")]
pub use redis_pubsub::{RedisPubSubTransport, connect_redis};
