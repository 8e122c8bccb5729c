//! Publisher configuration.
//!
//! Every setting is resolved from an explicit override first, then from a
//! [`ConfigSource`] (the process environment by default). Empty strings count
//! as missing. All missing settings are reported together.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use eventlogger_core::ConfigError;

pub const ENV_PROJECT_ID: &str = "LOG_GCP_PROJECT";
pub const ENV_TOPIC_NAME: &str = "LOG_TOPIC";
pub const ENV_ENVIRONMENT: &str = "LOG_ENVIRONMENT";
pub const ENV_SERVICE_NAME: &str = "LOG_SERVICE_NAME";
pub const ENV_CREDENTIALS: &str = "LOG_GCP_CREDENTIALS";

/// Topic used when `LOG_TOPIC` is not set at all.
pub const DEFAULT_TOPIC: &str = "events";

/// Key/value lookup for settings not passed explicitly.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Raw lookup for path-valued settings, which need not be UTF-8.
    fn get_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

/// Reads the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn get_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Fixed in-memory settings (tests, embedding).
#[derive(Debug, Default, Clone)]
pub struct MapSource(HashMap<String, OsString>);

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(|v| v.to_str()).map(str::to_string)
    }

    fn get_os(&self, key: &str) -> Option<OsString> {
        self.0.get(key).cloned()
    }
}

/// Explicit settings; anything left `None` (or empty) falls back to the source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub project_id: Option<String>,
    pub topic_name: Option<String>,
    pub environment: Option<String>,
    pub service_name: Option<String>,
    pub credentials_path: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_id(mut self, v: impl Into<String>) -> Self {
        self.project_id = Some(v.into());
        self
    }

    pub fn topic_name(mut self, v: impl Into<String>) -> Self {
        self.topic_name = Some(v.into());
        self
    }

    pub fn environment(mut self, v: impl Into<String>) -> Self {
        self.environment = Some(v.into());
        self
    }

    pub fn service_name(mut self, v: impl Into<String>) -> Self {
        self.service_name = Some(v.into());
        self
    }

    pub fn credentials_path(mut self, v: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(v.into());
        self
    }
}

/// Fully resolved publisher settings; every field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    project_id: String,
    topic_name: String,
    environment: String,
    service_name: String,
    credentials_path: PathBuf,
}

impl PublisherConfig {
    /// Resolve overrides against the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, &EnvSource)
    }

    /// Resolve overrides against `source`, batch-reporting every missing field.
    pub fn resolve(
        overrides: ConfigOverrides,
        source: &dyn ConfigSource,
    ) -> Result<Self, ConfigError> {
        let lookup = |explicit: Option<String>, key: &str| -> Option<String> {
            non_empty(explicit).or_else(|| source.get(key))
        };

        let project_id = non_empty(lookup(overrides.project_id, ENV_PROJECT_ID));
        // Unset topic falls back to the default; a topic set to "" stays missing.
        let topic_name = lookup(overrides.topic_name, ENV_TOPIC_NAME)
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string());
        let topic_name = non_empty(Some(topic_name));
        let environment = non_empty(lookup(overrides.environment, ENV_ENVIRONMENT));
        let service_name = non_empty(lookup(overrides.service_name, ENV_SERVICE_NAME));
        // Paths stay as OS strings end to end; they need not be UTF-8.
        let credentials_path = overrides
            .credentials_path
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| source.get_os(ENV_CREDENTIALS).map(PathBuf::from))
            .filter(|p| !p.as_os_str().is_empty());

        let mut missing = Vec::new();
        if project_id.is_none() {
            missing.push("LOG_GCP_PROJECT / project_id");
        }
        if topic_name.is_none() {
            missing.push("LOG_TOPIC / topic_name");
        }
        if environment.is_none() {
            missing.push("LOG_ENVIRONMENT / environment");
        }
        if service_name.is_none() {
            missing.push("LOG_SERVICE_NAME / service_name");
        }
        if credentials_path.is_none() {
            missing.push("LOG_GCP_CREDENTIALS / credentials_path");
        }

        match (project_id, topic_name, environment, service_name, credentials_path) {
            (
                Some(project_id),
                Some(topic_name),
                Some(environment),
                Some(service_name),
                Some(credentials_path),
            ) => Ok(Self {
                project_id,
                topic_name,
                environment,
                service_name,
                credentials_path,
            }),
            _ => Err(ConfigError::missing(missing)),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Fully qualified topic address handed to the transport.
    pub fn topic_path(&self) -> String {
        format!("projects/{}/topics/{}", self.project_id, self.topic_name)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
