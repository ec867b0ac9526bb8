//! Leveled application logging with HTTP access logs.

pub mod config;
pub mod http;
pub mod humanize;
pub mod logging;

pub use config::{AppConfig, LogConfig};
pub use http::{AccessLogFlags, AccessLogLayer};
pub use logging::{init, Level, LoggedError, Logger};
