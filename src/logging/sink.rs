//! Sinks: where records are encoded and written.
//!
//! # Responsibilities
//! - Expose a cheap `enabled` check used by the dispatch fast path
//! - Encode a record as text (optionally colored) or JSON
//! - Serialize physical writes to the underlying writer
//!
//! # Design Decisions
//! - The writer is any `tracing_subscriber` `MakeWriter`, so stderr, test
//!   buffers and files plug in the same way they do for `fmt` layers
//! - A record is fully encoded before the write lock is taken; one
//!   `write_all` per record keeps lines intact

use chrono::SecondsFormat;
use nu_ansi_term::{Color, Style};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::logging::format;
use crate::logging::level::{Level, LevelVar};
use crate::logging::record::Record;

/// Destination for log records.
pub trait Sink: Send + Sync {
    /// Whether a record at `level` would be written. Must be cheap.
    fn enabled(&self, level: Level) -> bool;

    /// Encode and write one record.
    fn handle(&self, record: &Record) -> Result<(), SinkError>;
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write log record: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Output encoding of a [`WriterSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Human-readable line, ANSI colored when `color` is set.
    Text { color: bool },
    /// One JSON object per line.
    Json,
}

/// Sink that encodes records and writes them through a `MakeWriter`.
pub struct WriterSink {
    make_writer: BoxMakeWriter,
    encoding: Encoding,
    level: Arc<LevelVar>,
    add_source: bool,
    time_format: String,
    write_lock: Mutex<()>,
}

impl WriterSink {
    /// Create a sink writing to `make_writer`.
    pub fn new<W>(make_writer: W, encoding: Encoding, level: Arc<LevelVar>) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            make_writer: BoxMakeWriter::new(make_writer),
            encoding,
            level,
            add_source: false,
            time_format: format::HHMMSS_24H.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a sink writing to standard error.
    pub fn stderr(encoding: Encoding, level: Arc<LevelVar>) -> Self {
        Self::new(io::stderr, encoding, level)
    }

    /// Attach the caller's file and line to every record.
    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    /// strftime layout for the text timestamp. JSON always uses RFC 3339.
    pub fn with_time_format(mut self, layout: impl Into<String>) -> Self {
        self.time_format = layout.into();
        self
    }

    fn encode_text(&self, record: &Record, color: bool) -> String {
        let (faint, level_style) = if color {
            (Style::new().dimmed(), level_color(record.level).normal())
        } else {
            (Style::new(), Style::new())
        };

        let mut stamp = String::new();
        if write!(stamp, "{}", record.time.format(&self.time_format)).is_err() {
            // chrono reports a bad layout only while rendering
            stamp = record.time.to_rfc3339_opts(SecondsFormat::Millis, false);
        }

        let mut line = String::with_capacity(64 + record.message.len());
        let _ = write!(
            line,
            "{} {} ",
            faint.paint(stamp),
            level_style.paint(record.level.tag())
        );
        if self.add_source {
            let source = format!("{}:{}", record.location.file(), record.location.line());
            let _ = write!(line, "{} ", faint.paint(source));
        }
        line.push_str(&record.message);
        line.push('\n');
        line
    }

    fn encode_json(&self, record: &Record) -> Result<Vec<u8>, serde_json::Error> {
        let line = JsonLine {
            time: record.time.to_rfc3339_opts(SecondsFormat::Nanos, false),
            level: record.level.as_str(),
            source: self.add_source.then(|| JsonSource {
                file: record.location.file(),
                line: record.location.line(),
            }),
            msg: &record.message,
        };
        let mut buf = serde_json::to_vec(&line)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

impl Sink for WriterSink {
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), SinkError> {
        let buf = match self.encoding {
            Encoding::Text { color } => self.encode_text(record, color).into_bytes(),
            Encoding::Json => self.encode_json(record)?,
        };

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut writer = self.make_writer.make_writer();
        writer.write_all(&buf)?;
        writer.flush()?;
        Ok(())
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    time: String,
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<JsonSource<'a>>,
    msg: &'a str,
}

#[derive(Serialize)]
struct JsonSource<'a> {
    file: &'a str,
    line: u32,
}
