//! Message-bus transport abstraction (mechanics only).
//!
//! The facade hands a fully serialized envelope to a [`Transport`] together
//! with the topic address. What happens next (batching, retries, broker
//! acknowledgements) belongs to the transport, not to this crate.
//!
//! ## Delivery model
//!
//! - **Fire-and-forget**: callers are never blocked waiting for confirmation.
//! - **No ordering guarantees**: concurrent publishes may reach the broker in
//!   any order.
//! - **No retries here**: a failed publish is reported once and dropped.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use eventlogger_core::TransportError;

/// What the transport knows right after accepting a payload.
#[derive(Debug)]
pub enum Delivery {
    /// The broker acknowledged synchronously.
    Confirmed,
    /// Accepted for sending; confirmation arrives later on the handle.
    Pending(PendingPublish),
}

/// Handle to a publish whose confirmation is still outstanding.
///
/// Dropping the handle is fine: the publish continues regardless.
#[derive(Debug)]
pub struct PendingPublish {
    receiver: Receiver<Result<(), TransportError>>,
}

/// Resolving side of a [`PendingPublish`], kept by the transport.
#[derive(Debug, Clone)]
pub struct PublishCompleter {
    sender: mpsc::SyncSender<Result<(), TransportError>>,
}

impl PendingPublish {
    /// Create a linked (handle, completer) pair.
    pub fn channel() -> (Self, PublishCompleter) {
        let (sender, receiver) = mpsc::sync_channel(1);
        (Self { receiver }, PublishCompleter { sender })
    }

    /// Block until the transport confirms or fails the publish.
    pub fn wait(self) -> Result<(), TransportError> {
        self.receiver.recv().unwrap_or(Err(TransportError::Abandoned))
    }

    /// Block for up to `timeout`; `None` means still outstanding.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<(), TransportError>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(TransportError::Abandoned)),
        }
    }

    /// Poll without blocking; `None` means still outstanding.
    pub fn try_result(&self) -> Option<Result<(), TransportError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TransportError::Abandoned)),
        }
    }
}

impl PublishCompleter {
    /// Resolve the paired handle. Ignored if the handle was dropped.
    pub fn complete(&self, result: Result<(), TransportError>) {
        let _ = self.sender.try_send(result);
    }
}

/// Topic-addressed, byte-payload publish client.
///
/// `publish()` may fail synchronously (returned `Err`) or asynchronously
/// (a [`Delivery::Pending`] handle that later resolves to an error).
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync`; the facade shares one transport
/// across every caller thread without extra locking.
pub trait Transport: Send + Sync {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<Delivery, TransportError>;
}

impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<Delivery, TransportError> {
        (**self).publish(topic, payload)
    }
}
