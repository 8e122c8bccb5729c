//! Publisher facade: the logging-call surface exposed to application code.
//!
//! ## Failure model
//!
//! Event logging is best-effort instrumentation, never on the critical path:
//!
//! - transport failures become [`PublishOutcome::Failed`] and are logged
//!   locally; the caller still gets the envelope that was built
//! - malformed arguments become [`PublishOutcome::Rejected`]
//! - nothing here panics or returns `Err` to the caller
//!
//! Callers depend on `Arc<dyn EventLogger>` so that an unconfigured process
//! can hand out a [`NullFacade`](crate::NullFacade) instead.

use std::sync::Arc;

use eventlogger_core::{EnvelopeError, FacadeError, Level, TransportError};

use crate::builder::{self, FacadeDefaults};
use crate::config::PublisherConfig;
use crate::transport::{Delivery, PendingPublish, Transport};
use crate::{EventEnvelope, EventRequest};

/// Result of handing one event to the transport.
#[derive(Debug)]
pub enum PublishOutcome {
    /// The transport acknowledged synchronously.
    Delivered,
    /// Accepted; confirmation can be awaited on the handle.
    Pending(PendingPublish),
    /// The transport refused the payload. The envelope was built but not sent.
    Failed(TransportError),
    /// The call arguments could not produce an envelope.
    Rejected(EnvelopeError),
    /// No facade is configured; the call was dropped.
    Discarded,
}

impl PublishOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Delivered or pending.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Delivered | Self::Pending(_))
    }
}

/// The built envelope (if any) paired with what happened to it.
#[derive(Debug)]
pub struct Publication {
    envelope: Option<EventEnvelope>,
    outcome: PublishOutcome,
}

impl Publication {
    pub fn new(envelope: Option<EventEnvelope>, outcome: PublishOutcome) -> Self {
        Self { envelope, outcome }
    }

    /// Placeholder returned by the no-op facade.
    pub fn discarded() -> Self {
        Self::new(None, PublishOutcome::Discarded)
    }

    pub fn envelope(&self) -> Option<&EventEnvelope> {
        self.envelope.as_ref()
    }

    pub fn outcome(&self) -> &PublishOutcome {
        &self.outcome
    }

    pub fn into_parts(self) -> (Option<EventEnvelope>, PublishOutcome) {
        (self.envelope, self.outcome)
    }
}

/// Leveled structured-event logging.
///
/// Everything funnels into [`publish_event`](EventLogger::publish_event); the
/// leveled methods only fix the level.
pub trait EventLogger: Send + Sync {
    fn publish_event(&self, level: Level, request: EventRequest) -> Publication;

    /// Arbitrary level (e.g. `"audit"`).
    fn log(&self, level: Level, request: EventRequest) -> Publication {
        self.publish_event(level, request)
    }

    fn debug(&self, request: EventRequest) -> Publication {
        self.publish_event(Level::DEBUG, request)
    }

    fn info(&self, request: EventRequest) -> Publication {
        self.publish_event(Level::INFO, request)
    }

    fn warning(&self, request: EventRequest) -> Publication {
        self.publish_event(Level::WARNING, request)
    }

    fn error(&self, request: EventRequest) -> Publication {
        self.publish_event(Level::ERROR, request)
    }
}

impl<L> EventLogger for Arc<L>
where
    L: EventLogger + ?Sized,
{
    fn publish_event(&self, level: Level, request: EventRequest) -> Publication {
        (**self).publish_event(level, request)
    }
}

/// Publishes envelopes to one topic through a [`Transport`].
pub struct PublisherFacade {
    config: PublisherConfig,
    defaults: FacadeDefaults,
    topic_path: String,
    transport: Arc<dyn Transport>,
}

impl PublisherFacade {
    pub fn new(config: PublisherConfig, transport: Arc<dyn Transport>) -> Self {
        let defaults = FacadeDefaults::new(config.service_name(), config.environment());
        let topic_path = config.topic_path();

        tracing::debug!(
            service = %defaults.service(),
            environment = %defaults.environment(),
            topic = %topic_path,
            "event logger initialized"
        );

        Self {
            config,
            defaults,
            topic_path,
            transport,
        }
    }

    /// Build the transport from the resolved config (credentials, project),
    /// then wrap it.
    pub fn connect<F>(config: PublisherConfig, connector: F) -> Result<Self, FacadeError>
    where
        F: FnOnce(&PublisherConfig) -> Result<Arc<dyn Transport>, TransportError>,
    {
        let transport = connector(&config)?;
        Ok(Self::new(config, transport))
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    pub fn service_name(&self) -> &str {
        self.defaults.service()
    }

    pub fn environment(&self) -> &str {
        self.defaults.environment()
    }

    pub fn topic_path(&self) -> &str {
        &self.topic_path
    }
}

impl core::fmt::Debug for PublisherFacade {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublisherFacade")
            .field("service", &self.defaults.service())
            .field("environment", &self.defaults.environment())
            .field("topic_path", &self.topic_path)
            .finish_non_exhaustive()
    }
}

impl EventLogger for PublisherFacade {
    fn publish_event(&self, level: Level, request: EventRequest) -> Publication {
        let envelope = match builder::build(&request, &level, &self.defaults) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(
                    event_type = %request.event_type(),
                    level = %level,
                    "rejected event: {err}"
                );
                return Publication::new(None, PublishOutcome::Rejected(err));
            }
        };

        let payload = match envelope.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(event_id = %envelope.event_id(), "failed to encode event: {err}");
                return Publication::new(Some(envelope), PublishOutcome::Rejected(err));
            }
        };

        tracing::info!(
            "[event] {} {} - {}",
            envelope.event_type(),
            envelope.level(),
            envelope.event_id()
        );

        let outcome = match self.transport.publish(&self.topic_path, payload) {
            Ok(Delivery::Confirmed) => PublishOutcome::Delivered,
            Ok(Delivery::Pending(handle)) => PublishOutcome::Pending(handle),
            Err(err) => {
                tracing::error!(
                    event_id = %envelope.event_id(),
                    topic = %self.topic_path,
                    "failed to publish event: {err}"
                );
                return Publication::new(Some(envelope), PublishOutcome::Failed(err));
            }
        };

        tracing::debug!(
            event_id = %envelope.event_id(),
            topic = %self.topic_path,
            "published event"
        );
        Publication::new(Some(envelope), outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::{ConfigOverrides, MapSource};
    use crate::in_memory_transport::{InMemoryMode, InMemoryTransport};

    fn test_config() -> PublisherConfig {
        let overrides = ConfigOverrides::new()
            .project_id("acme")
            .environment("staging")
            .service_name("checkout-api")
            .credentials_path("/tmp/creds.json");
        PublisherConfig::resolve(overrides, &MapSource::new()).unwrap()
    }

    fn setup(mode: InMemoryMode) -> (PublisherFacade, Arc<InMemoryTransport>) {
        let transport = Arc::new(InMemoryTransport::with_mode(mode));
        let facade = PublisherFacade::new(test_config(), transport.clone());
        (facade, transport)
    }

    #[test]
    fn publish_sends_envelope_to_topic_path() {
        let (facade, transport) = setup(InMemoryMode::Confirm);

        let publication = facade.info(EventRequest::new("signup").data(json!({ "user": "abc" })));
        let envelope = publication.envelope().unwrap();
        assert!(matches!(publication.outcome(), PublishOutcome::Delivered));

        let sent = transport.published();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].topic, "projects/acme/topics/events");

        let on_wire = EventEnvelope::from_payload(&sent[0].payload).unwrap();
        assert_eq!(&on_wire, envelope);
        assert_eq!(on_wire.service(), "checkout-api");
        assert_eq!(on_wire.environment(), "staging");
        assert_eq!(on_wire.data(), r#"{"user":"abc"}"#);
        assert_eq!(on_wire.actor(), "{}");
    }

    #[test]
    fn leveled_methods_set_their_level() {
        let (facade, _transport) = setup(InMemoryMode::Confirm);

        let levels = [
            (facade.debug("e".into()), "debug"),
            (facade.info("e".into()), "info"),
            (facade.warning("e".into()), "warning"),
            (facade.error("e".into()), "error"),
        ];
        for (publication, expected) in levels {
            assert_eq!(publication.envelope().unwrap().level().as_str(), expected);
        }
    }

    #[test]
    fn generic_log_accepts_custom_levels() {
        let (facade, _transport) = setup(InMemoryMode::Confirm);
        let publication = facade.log(Level::custom("audit"), "login".into());
        assert_eq!(publication.envelope().unwrap().level().as_str(), "audit");
    }

    #[test]
    fn transport_failure_still_returns_envelope() {
        let (facade, transport) =
            setup(InMemoryMode::Fail(TransportError::connection("unreachable")));

        let publication = facade.error(
            EventRequest::new("payment_failed")
                .correlation_id("order-7")
                .actor(json!({ "id": "u-1" })),
        );

        let envelope = publication.envelope().expect("envelope survives failure");
        assert_eq!(envelope.event_type(), "payment_failed");
        assert_eq!(envelope.correlation_id().as_str(), "order-7");
        assert_eq!(envelope.actor(), r#"{"id":"u-1"}"#);
        assert!(publication.outcome().is_failed());
        assert!(transport.published().is_empty());
    }

    #[test]
    fn pending_outcome_resolves_through_transport() {
        let (facade, transport) = setup(InMemoryMode::Defer);

        let (envelope, outcome) = facade.info("queued".into()).into_parts();
        assert!(envelope.is_some());
        let PublishOutcome::Pending(handle) = outcome else {
            panic!("expected pending outcome");
        };

        transport.confirm_all();
        assert_eq!(handle.wait(), Ok(()));
    }

    #[test]
    fn invalid_arguments_are_rejected_not_raised() {
        let (facade, transport) = setup(InMemoryMode::Confirm);

        let publication = facade.info(EventRequest::new("x").data(json!(42)));
        assert!(publication.envelope().is_none());
        assert!(matches!(
            publication.outcome(),
            PublishOutcome::Rejected(EnvelopeError::NotAnObject { field: "data", .. })
        ));

        let publication = facade.info(EventRequest::new(""));
        assert!(matches!(
            publication.outcome(),
            PublishOutcome::Rejected(EnvelopeError::Validation(_))
        ));
        assert!(transport.published().is_empty());
    }

    #[test]
    fn connect_propagates_connector_failure() {
        let err = PublisherFacade::connect(test_config(), |_| {
            Err(TransportError::auth("credentials file unreadable"))
        })
        .unwrap_err();

        assert!(matches!(err, FacadeError::Transport(TransportError::Auth(_))));
    }

    #[test]
    fn connect_hands_config_to_connector() {
        let facade = PublisherFacade::connect(test_config(), |cfg| {
            assert_eq!(cfg.credentials_path().to_str(), Some("/tmp/creds.json"));
            Ok(Arc::new(InMemoryTransport::new()) as Arc<dyn Transport>)
        })
        .unwrap();

        assert_eq!(facade.topic_path(), "projects/acme/topics/events");
        assert_eq!(facade.service_name(), "checkout-api");
    }

    #[test]
    fn facade_is_shareable_across_threads() {
        let (facade, transport) = setup(InMemoryMode::Confirm);
        let logger: Arc<dyn EventLogger> = Arc::new(facade);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    logger.info(EventRequest::new("tick").data(json!({ "worker": i })))
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().outcome().is_accepted());
        }

        assert_eq!(transport.published().len(), 4);
    }
}
