//! Redis pub/sub-backed transport (optional).
//!
//! Redis pub/sub is not durable: a message published while no subscriber is
//! listening is dropped. That matches the facade's best-effort contract.
//! The topic path (`projects/{project}/topics/{topic}`) is used verbatim as
//! the channel name.

use std::sync::Arc;

use redis::Commands;

use eventlogger_core::TransportError;
use eventlogger_events::{Delivery, PublisherConfig, Transport};

/// Redis pub/sub transport for JSON event envelopes.
#[derive(Debug, Clone)]
pub struct RedisPubSubTransport {
    client: redis::Client,
}

impl RedisPubSubTransport {
    pub fn new(redis_url: impl AsRef<str>) -> Result<Self, TransportError> {
        let client = redis::Client::open(redis_url.as_ref()).map_err(map_redis_error)?;
        Ok(Self { client })
    }
}

impl Transport for RedisPubSubTransport {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<Delivery, TransportError> {
        let mut conn = self.client.get_connection().map_err(map_redis_error)?;

        let receivers: i64 = conn.publish(topic, payload).map_err(map_redis_error)?;
        tracing::trace!(topic, receivers, "redis publish acknowledged");

        Ok(Delivery::Confirmed)
    }
}

/// Connector for `PublisherFacade::connect` / `global::initialize`.
///
/// The credentials reference points at a file whose first non-empty line is
/// the Redis connection URL (password included).
pub fn connect_redis(config: &PublisherConfig) -> Result<Arc<dyn Transport>, TransportError> {
    let raw = std::fs::read_to_string(config.credentials_path()).map_err(|e| {
        TransportError::auth(format!(
            "cannot read credentials {}: {}",
            config.credentials_path().display(),
            e
        ))
    })?;
    let url = parse_redis_url(&raw)?;
    Ok(Arc::new(RedisPubSubTransport::new(url)?))
}

fn parse_redis_url(raw: &str) -> Result<&str, TransportError> {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| TransportError::auth("credentials file is empty"))
}

fn map_redis_error(err: redis::RedisError) -> TransportError {
    match err.kind() {
        redis::ErrorKind::AuthenticationFailed => TransportError::auth(err.to_string()),
        redis::ErrorKind::IoError => TransportError::connection(err.to_string()),
        _ if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() => {
            TransportError::connection(err.to_string())
        }
        _ => TransportError::other(err.to_string()),
    }
}
