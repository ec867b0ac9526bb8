//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use applog::logging::{Level, LevelVar, Logger, Record, Sink, SinkError};

/// Records every record it is handed, from both sinks, in call order.
#[derive(Clone)]
pub struct CaptureSink {
    level: Arc<LevelVar>,
    records: Arc<Mutex<Vec<Record>>>,
}

impl Sink for CaptureSink {
    fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct Captured(Arc<Mutex<Vec<Record>>>);

impl Captured {
    pub fn records(&self) -> Vec<Record> {
        self.0.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.records()
            .into_iter()
            .map(|r| (r.level, r.message))
            .collect()
    }
}

/// A logger at `threshold` whose normal and error sinks feed one capture.
pub fn capture_logger(threshold: Level) -> (Arc<Logger>, Captured) {
    let level = Arc::new(LevelVar::new(threshold));
    let records = Arc::new(Mutex::new(Vec::new()));
    let sink = CaptureSink {
        level: level.clone(),
        records: records.clone(),
    };
    let logger = Logger::from_sinks(sink.clone(), sink, level);
    (Arc::new(logger), Captured(records))
}

/// In-memory writer usable as a `MakeWriter` via `move || buf.clone()`.
#[derive(Clone, Default)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
