//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Logging façade and access-log settings.
    pub logging: LogConfig,

    /// Demo server settings.
    pub server: ServerConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Lower the threshold to Debug and attach source locations everywhere.
    pub verbose: bool,

    /// Emit JSON lines instead of text.
    pub json: bool,

    /// ANSI colors in text mode. Ignored for JSON.
    pub color: bool,

    /// Log each HTTP request at Info (when not verbose).
    pub access_log: bool,

    /// strftime layout for text timestamps (e.g. "%H:%M:%S").
    pub time_format: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            json: false,
            color: true,
            access_log: true,
            time_format: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.logging.color);
        assert!(config.logging.access_log);
    }

    #[test]
    fn test_partial_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [logging]
            verbose = true
            json = true
            time_format = "%H:%M"
            "#,
        )
        .unwrap();

        assert!(config.logging.verbose);
        assert!(config.logging.json);
        assert!(config.logging.color);
        assert_eq!(config.logging.time_format.as_deref(), Some("%H:%M"));
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
    }
}
