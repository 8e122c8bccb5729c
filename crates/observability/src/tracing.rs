//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Env var selecting the output format (`json`, `pretty`/`text`).
pub const ENV_LOG_FORMAT: &str = "EVENTLOGGER_LOG_FORMAT";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line (default; what log shippers expect).
    #[default]
    Json,
    /// Human-readable single-line output.
    Text,
}

impl LogFormat {
    /// Unknown values fall back to JSON.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "plain" => Self::Text,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl TracingConfig {
    pub fn from_env() -> Self {
        let format = std::env::var(ENV_LOG_FORMAT)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Pretty "), LogFormat::Text);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Json);
    }

    #[test]
    fn init_twice_is_harmless() {
        init(TracingConfig::default());
        init(TracingConfig {
            default_filter: "debug".to_string(),
            format: LogFormat::Text,
        });
    }
}
