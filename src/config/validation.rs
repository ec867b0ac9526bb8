//! Configuration validation.
//!
//! Returns every problem found, not just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::logging::format::is_valid_time_format;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address `{0}` is not a socket address")]
    BindAddress(String),
    #[error("logging.time_format `{0}` is not a valid strftime layout")]
    TimeFormat(String),
}

/// Semantic checks on a deserialized config.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }

    if let Some(layout) = &config.logging.time_format {
        if !is_valid_time_format(layout) {
            errors.push(ValidationError::TimeFormat(layout.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
