//! The logger: level-gated dispatch over a normal and an error sink.
//!
//! # Responsibilities
//! - Build both sinks from a [`LogConfig`]
//! - Route `Error` to the error sink and every other level to the normal sink
//! - Capture the caller's location for each record
//!
//! # Design Decisions
//! - The level check comes first; a filtered call does no formatting, no
//!   location capture and no allocation
//! - Every public dispatch method is `#[track_caller]`, so the recorded
//!   location is the first frame outside this crate's dispatch layer
//! - Sink failures are dropped; logging never fails the caller

use std::fmt::{self, Write as _};
use std::io::{self, Write as _};
use std::panic::Location;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::LogConfig;
use crate::logging::format;
use crate::logging::level::{Level, LevelVar};
use crate::logging::record::Record;
use crate::logging::sink::{Encoding, Sink, WriterSink};

/// Marker appended when a `Display` impl fails mid-message.
const FORMAT_ERROR_MARKER: &str = "%!(FORMAT ERROR)";

/// Error returned by [`Logger::errorw`], carrying the logged text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoggedError {
    message: String,
}

impl LoggedError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A pair of leveled sinks sharing one threshold.
pub struct Logger {
    normal: Box<dyn Sink>,
    error: Box<dyn Sink>,
    level: Arc<LevelVar>,
}

impl Logger {
    /// Build a logger writing to standard error.
    pub fn new(config: &LogConfig) -> Self {
        Self::with_writer(config, io::stderr)
    }

    /// Build a logger whose sinks both write through `make_writer`.
    pub fn with_writer<W>(config: &LogConfig, make_writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Clone + Send + Sync + 'static,
    {
        let level = Arc::new(LevelVar::new(if config.verbose {
            Level::Debug
        } else {
            Level::Info
        }));

        let encoding = if config.json {
            Encoding::Json
        } else {
            Encoding::Text {
                color: config.color,
            }
        };

        let time_format = match &config.time_format {
            Some(layout) => layout.clone(),
            None if config.verbose => format::STAMP_MILLI.to_string(),
            None => format::HHMMSS_24H.to_string(),
        };

        let normal = WriterSink::new(make_writer.clone(), encoding, level.clone())
            .with_source(config.verbose)
            .with_time_format(time_format.clone());
        let error = WriterSink::new(make_writer, encoding, level.clone())
            .with_source(true)
            .with_time_format(time_format);

        Self::from_sinks(normal, error, level)
    }

    /// Assemble a logger from custom sinks. `level` should be the threshold
    /// the sinks consult so `set_level` reaches them.
    pub fn from_sinks(
        normal: impl Sink + 'static,
        error: impl Sink + 'static,
        level: Arc<LevelVar>,
    ) -> Self {
        Self {
            normal: Box::new(normal),
            error: Box::new(error),
            level,
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        self.level.level()
    }

    /// Change the threshold of both sinks.
    pub fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    /// Whether a call at `level` would produce output.
    pub fn enabled(&self, level: Level) -> bool {
        self.sink_for(level).enabled(level)
    }

    #[track_caller]
    pub fn debug(&self, parts: &[&str]) {
        self.dispatch(Level::Debug, || parts.join(" "));
    }

    #[track_caller]
    pub fn info(&self, parts: &[&str]) {
        self.dispatch(Level::Info, || parts.join(" "));
    }

    #[track_caller]
    pub fn warn(&self, parts: &[&str]) {
        self.dispatch(Level::Warn, || parts.join(" "));
    }

    #[track_caller]
    pub fn error(&self, parts: &[&str]) {
        self.dispatch(Level::Error, || parts.join(" "));
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Debug, || render(args));
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Info, || render(args));
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Warn, || render(args));
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(Level::Error, || render(args));
    }

    /// Plain dispatch at a level chosen at runtime.
    #[track_caller]
    pub fn log(&self, level: Level, parts: &[&str]) {
        self.dispatch(level, || parts.join(" "));
    }

    /// Formatted dispatch at a level chosen at runtime.
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.dispatch(level, || render(args));
    }

    /// Log `"<text> <err>"` at Error and return it as an error value.
    ///
    /// Returns `None` when the error sink has Error disabled.
    #[track_caller]
    pub fn errorw<E>(&self, text: &str, err: &E) -> Option<LoggedError>
    where
        E: fmt::Display + ?Sized,
    {
        if !self.error.enabled(Level::Error) {
            return None;
        }

        let location = Location::caller();
        let record = Record::new(Level::Error, render(format_args!("{} {}", text, err)), location);
        let _ = self.error.handle(&record);

        Some(LoggedError {
            message: record.message,
        })
    }

    /// Write the joined parts verbatim to stdout when Info is enabled.
    pub fn print(&self, parts: &[&str]) {
        self.print_to(&mut io::stdout().lock(), parts);
    }

    fn print_to(&self, out: &mut impl io::Write, parts: &[&str]) {
        if !self.normal.enabled(Level::Info) {
            return;
        }

        let _ = writeln!(out, "{}", parts.join(" "));
    }

    fn sink_for(&self, level: Level) -> &dyn Sink {
        match level {
            Level::Error => self.error.as_ref(),
            _ => self.normal.as_ref(),
        }
    }

    #[track_caller]
    fn dispatch<F>(&self, level: Level, message: F)
    where
        F: FnOnce() -> String,
    {
        let sink = self.sink_for(level);
        if !sink.enabled(level) {
            return;
        }

        let location = Location::caller();
        let record = Record::new(level, message(), location);
        let _ = sink.handle(&record);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(&LogConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("level", &self.level()).finish()
    }
}

/// Render format arguments without panicking on a failing `Display` impl.
///
/// `fmt::write` stops at the first failing argument, so the message keeps
/// the text rendered up to that point and the marker replaces the rest:
/// `"value={} tail={}"` with a failing first argument gives
/// `"value=%!(FORMAT ERROR)"`.
fn render(args: fmt::Arguments<'_>) -> String {
    if let Some(s) = args.as_str() {
        return s.to_string();
    }

    let mut out = String::new();
    if out.write_fmt(args).is_err() {
        out.push_str(FORMAT_ERROR_MARKER);
    }
    out
}
