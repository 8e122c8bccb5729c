//! No-op logger for processes without a configured publisher.

use eventlogger_core::Level;

use crate::EventRequest;
use crate::facade::{EventLogger, Publication};

/// Stand-in used when no publisher is configured.
///
/// Same surface as [`PublisherFacade`](crate::PublisherFacade); every call is
/// dropped and returns [`Publication::discarded`]. Stateless, so a fresh one
/// is as good as a shared one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFacade;

impl NullFacade {
    pub fn new() -> Self {
        Self
    }
}

impl EventLogger for NullFacade {
    fn publish_event(&self, _level: Level, _request: EventRequest) -> Publication {
        Publication::discarded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::facade::PublishOutcome;

    #[test]
    fn every_operation_is_a_no_op() {
        let facade = NullFacade::new();
        let request = || EventRequest::new("signup").data(json!({ "user": "abc" }));

        let publications = [
            facade.debug(request()),
            facade.info(request()),
            facade.warning(request()),
            facade.error(request()),
            facade.log(Level::custom("audit"), request()),
            facade.publish_event(Level::INFO, request()),
        ];

        for publication in publications {
            assert!(publication.envelope().is_none());
            assert!(matches!(publication.outcome(), PublishOutcome::Discarded));
        }
    }

    #[test]
    fn even_invalid_arguments_are_silently_dropped() {
        let publication = NullFacade.info(EventRequest::new(""));
        assert!(matches!(publication.outcome(), PublishOutcome::Discarded));
    }
}
