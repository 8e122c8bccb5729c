//! Process-wide event logger holder.
//!
//! Prefer passing an `Arc<dyn EventLogger>` explicitly. This holder exists for
//! code that can't be threaded through (deep call stacks, panic hooks, ...).
//!
//! Usage is **initialize once at startup**: [`initialize`] (or [`install`])
//! replaces any previous logger, last write wins. Reads go through an
//! `RwLock`, so [`current`] never observes a half-built facade.

use std::sync::{Arc, RwLock};

use eventlogger_core::{FacadeError, TransportError};

use crate::config::{ConfigOverrides, PublisherConfig};
use crate::facade::{EventLogger, PublisherFacade};
use crate::null::NullFacade;
use crate::transport::Transport;

static CURRENT: RwLock<Option<Arc<dyn EventLogger>>> = RwLock::new(None);

/// Resolve config from `overrides` + the process environment, connect a
/// transport, and install the resulting facade.
///
/// On error nothing is installed and the previous logger (if any) stays.
pub fn initialize<F>(
    overrides: ConfigOverrides,
    connector: F,
) -> Result<Arc<PublisherFacade>, FacadeError>
where
    F: FnOnce(&PublisherConfig) -> Result<Arc<dyn Transport>, TransportError>,
{
    let config = PublisherConfig::from_env(overrides)?;
    let facade = Arc::new(PublisherFacade::connect(config, connector)?);
    install(facade.clone());

    tracing::info!(
        service = %facade.service_name(),
        environment = %facade.environment(),
        "event logger installed"
    );
    Ok(facade)
}

/// Install an already-built logger, replacing the previous one.
pub fn install(logger: Arc<dyn EventLogger>) {
    // A poisoned lock only means a writer panicked; the slot itself is
    // always a complete value.
    let mut slot = CURRENT.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(logger);
}

/// The installed logger, or a [`NullFacade`] when none is installed.
pub fn current() -> Arc<dyn EventLogger> {
    let slot = CURRENT.read().unwrap_or_else(|e| e.into_inner());
    match slot.as_ref() {
        Some(logger) => logger.clone(),
        None => {
            tracing::debug!("event logger not initialized, using no-op logger");
            Arc::new(NullFacade)
        }
    }
}

/// Whether a real logger has been installed.
pub fn is_initialized() -> bool {
    CURRENT.read().unwrap_or_else(|e| e.into_inner()).is_some()
}

/// Remove the installed logger (shutdown, tests).
pub fn reset() -> Option<Arc<dyn EventLogger>> {
    CURRENT.write().unwrap_or_else(|e| e.into_inner()).take()
}
