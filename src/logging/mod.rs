//! Logging façade.
//!
//! # Data Flow
//! ```text
//! call site (info / infof! / errorw ...)
//!     → logger.rs (level gate, caller capture, Record)
//!     → sink.rs (text or JSON encoding, locked write)
//!     → stderr / any MakeWriter
//!
//! init / configure / install:
//!     LogConfig → Logger::new → atomic swap of the process-wide logger
//! ```
//!
//! # Design Decisions
//! - The process-wide logger sits in an `ArcSwap`; dispatch takes a
//!   lock-free guard, re-initialization swaps the whole logger
//! - Call sites that want isolation hold an `Arc<Logger>` (or a
//!   [`LoggerRef::Scoped`]) instead of using the free functions
//! - Until `init` runs, the process-wide logger uses `LogConfig::default()`

pub mod format;
pub mod level;
pub mod logger;
pub mod record;
pub mod sink;
pub mod tracing_sink;

pub use level::{Level, LevelVar, ParseLevelError};
pub use logger::{LoggedError, Logger};
pub use record::Record;
pub use sink::{Encoding, Sink, SinkError, WriterSink};
pub use tracing_sink::TracingSink;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

use crate::config::LogConfig;

static LOGGER: Lazy<ArcSwap<Logger>> = Lazy::new(|| ArcSwap::from_pointee(Logger::default()));

/// Configure the process-wide logger from three toggles.
///
/// Call before serving traffic; a later call replaces the logger entirely.
pub fn init(verbose: bool, json: bool, color: bool) {
    configure(&LogConfig {
        verbose,
        json,
        color,
        ..LogConfig::default()
    });
}

/// Configure the process-wide logger from a full config section.
pub fn configure(config: &LogConfig) {
    install(Logger::new(config));
}

/// Replace the process-wide logger.
pub fn install(logger: Logger) {
    LOGGER.store(Arc::new(logger));
}

/// Handle to the current process-wide logger.
pub fn current() -> Arc<Logger> {
    LOGGER.load_full()
}

/// Which logger a long-lived component writes to.
#[derive(Clone, Debug, Default)]
pub enum LoggerRef {
    /// The process-wide logger, resolved on every use.
    #[default]
    Global,
    /// A specific logger instance.
    Scoped(Arc<Logger>),
}

impl LoggerRef {
    pub fn get(&self) -> Arc<Logger> {
        match self {
            LoggerRef::Global => current(),
            LoggerRef::Scoped(logger) => logger.clone(),
        }
    }
}

impl From<Arc<Logger>> for LoggerRef {
    fn from(logger: Arc<Logger>) -> Self {
        LoggerRef::Scoped(logger)
    }
}

#[track_caller]
pub fn debug(parts: &[&str]) {
    LOGGER.load().debug(parts);
}

#[track_caller]
pub fn info(parts: &[&str]) {
    LOGGER.load().info(parts);
}

#[track_caller]
pub fn warn(parts: &[&str]) {
    LOGGER.load().warn(parts);
}

#[track_caller]
pub fn error(parts: &[&str]) {
    LOGGER.load().error(parts);
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    LOGGER.load().debugf(args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    LOGGER.load().infof(args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    LOGGER.load().warnf(args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    LOGGER.load().errorf(args);
}

/// See [`Logger::errorw`].
#[track_caller]
pub fn errorw<E>(text: &str, err: &E) -> Option<LoggedError>
where
    E: fmt::Display + ?Sized,
{
    LOGGER.load().errorw(text, err)
}

/// See [`Logger::print`].
pub fn print(parts: &[&str]) {
    LOGGER.load().print(parts);
}

/// Formatted Debug dispatch: `debugf!("x = {}", x)` or
/// `debugf!(logger: &logger, "x = {}", x)`.
#[macro_export]
macro_rules! debugf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logging::debugf(::std::format_args!($($arg)+))
    };
}

/// Formatted Info dispatch.
#[macro_export]
macro_rules! infof {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logging::infof(::std::format_args!($($arg)+))
    };
}

/// Formatted Warn dispatch.
#[macro_export]
macro_rules! warnf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logging::warnf(::std::format_args!($($arg)+))
    };
}

/// Formatted Error dispatch.
#[macro_export]
macro_rules! errorf {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logging::errorf(::std::format_args!($($arg)+))
    };
}
