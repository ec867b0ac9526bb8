//! A single log event on its way to a sink.

use chrono::{DateTime, Local};
use std::panic::Location;

use crate::logging::level::Level;

/// One log event. Built per dispatch call, handed to a sink, then dropped.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    /// Call site that issued the log call.
    pub location: &'static Location<'static>,
}

impl Record {
    /// Create a record stamped with the current wall-clock time.
    pub fn new(level: Level, message: String, location: &'static Location<'static>) -> Self {
        Self {
            time: Local::now(),
            level,
            message,
            location,
        }
    }
}
