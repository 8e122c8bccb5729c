//! In-memory transport for tests/dev.

use std::sync::Mutex;

use eventlogger_core::TransportError;

use crate::transport::{Delivery, PendingPublish, PublishCompleter, Transport};

/// How [`InMemoryTransport`] answers a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InMemoryMode {
    /// Record and acknowledge synchronously.
    Confirm,
    /// Record and hand back a pending handle; resolve with `confirm_all` / `fail_all`.
    Defer,
    /// Reject every publish with the given error (nothing is recorded).
    Fail(TransportError),
}

/// A single accepted publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Recording transport.
///
/// - No IO / no async
/// - Keeps every accepted payload for inspection
#[derive(Debug)]
pub struct InMemoryTransport {
    mode: Mutex<InMemoryMode>,
    published: Mutex<Vec<PublishedMessage>>,
    outstanding: Mutex<Vec<PublishCompleter>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::with_mode(InMemoryMode::Confirm)
    }

    pub fn with_mode(mode: InMemoryMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            published: Mutex::new(Vec::new()),
            outstanding: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self::with_mode(InMemoryMode::Fail(error))
    }

    pub fn set_mode(&self, mode: InMemoryMode) {
        if let Ok(mut current) = self.mode.lock() {
            *current = mode;
        }
    }

    /// Snapshot of everything accepted so far, in publish order.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Drain the publish log, leaving it empty.
    pub fn take_published(&self) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .map(|mut p| std::mem::take(&mut *p))
            .unwrap_or_default()
    }

    /// Number of deferred publishes still waiting for `confirm_all` / `fail_all`.
    pub fn outstanding(&self) -> usize {
        self.outstanding.lock().map(|o| o.len()).unwrap_or(0)
    }

    /// Forget every recorded payload and abandon outstanding deferred publishes.
    ///
    /// Handles still held by callers resolve to `TransportError::Abandoned`.
    pub fn clear(&self) {
        if let Ok(mut published) = self.published.lock() {
            published.clear();
            published.shrink_to_fit();
        }
        if let Ok(mut outstanding) = self.outstanding.lock() {
            outstanding.clear();
            outstanding.shrink_to_fit();
        }
    }

    /// Resolve every outstanding deferred publish as delivered.
    pub fn confirm_all(&self) -> usize {
        self.resolve_all(|| Ok(()))
    }

    /// Resolve every outstanding deferred publish with `error`.
    pub fn fail_all(&self, error: TransportError) -> usize {
        self.resolve_all(|| Err(error.clone()))
    }

    fn resolve_all(&self, result: impl Fn() -> Result<(), TransportError>) -> usize {
        let drained: Vec<PublishCompleter> = match self.outstanding.lock() {
            Ok(mut outstanding) => outstanding.drain(..).collect(),
            Err(_) => return 0,
        };
        for completer in &drained {
            completer.complete(result());
        }
        drained.len()
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for InMemoryTransport {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<Delivery, TransportError> {
        let mode = self
            .mode
            .lock()
            .map_err(|_| TransportError::other("mode lock poisoned"))?
            .clone();

        if let InMemoryMode::Fail(error) = &mode {
            return Err(error.clone());
        }

        self.published
            .lock()
            .map_err(|_| TransportError::other("publish log poisoned"))?
            .push(PublishedMessage {
                topic: topic.to_string(),
                payload,
            });

        match mode {
            InMemoryMode::Defer => {
                let (pending, completer) = PendingPublish::channel();
                self.outstanding
                    .lock()
                    .map_err(|_| TransportError::other("outstanding list poisoned"))?
                    .push(completer);
                Ok(Delivery::Pending(pending))
            }
            _ => Ok(Delivery::Confirmed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_mode_records_and_acks() {
        let transport = InMemoryTransport::new();
        let delivery = transport.publish("projects/p/topics/events", b"{}".to_vec()).unwrap();

        assert!(matches!(delivery, Delivery::Confirmed));
        assert_eq!(
            transport.published(),
            vec![PublishedMessage {
                topic: "projects/p/topics/events".to_string(),
                payload: b"{}".to_vec(),
            }]
        );
    }

    #[test]
    fn defer_mode_resolves_on_confirm_all() {
        let transport = InMemoryTransport::with_mode(InMemoryMode::Defer);
        let Delivery::Pending(pending) = transport.publish("t", b"1".to_vec()).unwrap() else {
            panic!("expected pending delivery");
        };

        assert!(pending.try_result().is_none());
        assert_eq!(transport.confirm_all(), 1);
        assert_eq!(pending.wait(), Ok(()));
        assert_eq!(transport.confirm_all(), 0);
    }

    #[test]
    fn defer_mode_can_fail_later() {
        let transport = InMemoryTransport::with_mode(InMemoryMode::Defer);
        let Delivery::Pending(pending) = transport.publish("t", b"1".to_vec()).unwrap() else {
            panic!("expected pending delivery");
        };

        transport.fail_all(TransportError::connection("broker went away"));
        assert!(matches!(pending.wait(), Err(TransportError::Connection(_))));
    }

    #[test]
    fn take_published_drains_the_log() {
        let transport = InMemoryTransport::new();
        transport.publish("t", b"1".to_vec()).unwrap();
        transport.publish("t", b"2".to_vec()).unwrap();

        let taken = transport.take_published();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[1].payload, b"2".to_vec());
        assert!(transport.published().is_empty());

        transport.publish("t", b"3".to_vec()).unwrap();
        assert_eq!(transport.take_published().len(), 1);
    }

    #[test]
    fn clear_abandons_outstanding_publishes() {
        let transport = InMemoryTransport::with_mode(InMemoryMode::Defer);
        let Delivery::Pending(pending) = transport.publish("t", b"1".to_vec()).unwrap() else {
            panic!("expected pending delivery");
        };
        assert_eq!(transport.outstanding(), 1);

        transport.clear();

        assert_eq!(transport.outstanding(), 0);
        assert!(transport.published().is_empty());
        assert_eq!(pending.wait(), Err(TransportError::Abandoned));
        assert_eq!(transport.confirm_all(), 0);
    }

    #[test]
    fn fail_mode_rejects_without_recording() {
        let transport = InMemoryTransport::failing(TransportError::auth("bad key"));
        let err = transport.publish("t", b"1".to_vec()).unwrap_err();

        assert_eq!(err, TransportError::Auth("bad key".to_string()));
        assert!(transport.published().is_empty());
    }
}
