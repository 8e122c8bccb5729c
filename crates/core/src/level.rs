//! Event severity tag.
//!
//! `Level` is an **open** string: the four well-known values cover the leveled
//! facade methods, but any other tag (e.g. `"audit"`, `"critical"`) is accepted
//! through the generic `log` entry point and passed through untouched.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(Cow<'static, str>);

impl Level {
    pub const DEBUG: Level = Level(Cow::Borrowed("debug"));
    pub const INFO: Level = Level(Cow::Borrowed("info"));
    pub const WARNING: Level = Level(Cow::Borrowed("warning"));
    pub const ERROR: Level = Level(Cow::Borrowed("error"));

    /// Arbitrary caller-defined level.
    pub fn custom(level: impl Into<String>) -> Self {
        Self(Cow::Owned(level.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the four levels with a dedicated facade method.
    pub fn is_well_known(&self) -> bool {
        matches!(self.as_str(), "debug" | "info" | "warning" | "error")
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        Self::custom(value)
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Self::custom(value)
    }
}
