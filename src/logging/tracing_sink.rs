//! Sink that re-emits records as `tracing` events.

use std::sync::Arc;

use crate::logging::level::{Level, LevelVar};
use crate::logging::record::Record;
use crate::logging::sink::{Sink, SinkError};

/// Forwards records to whatever `tracing` subscriber is installed.
///
/// The call site travels as `caller.file` / `caller.line` fields since event
/// metadata is fixed at the macro site inside this module.
pub struct TracingSink {
    level: Arc<LevelVar>,
}

impl TracingSink {
    pub fn new(level: Arc<LevelVar>) -> Self {
        Self { level }
    }
}

impl Sink for TracingSink {
    fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), SinkError> {
        let file = record.location.file();
        let line = record.location.line();
        let message = record.message.as_str();

        match record.level {
            Level::Debug => tracing::debug!(caller.file = file, caller.line = line, "{}", message),
            Level::Info => tracing::info!(caller.file = file, caller.line = line, "{}", message),
            Level::Warn => tracing::warn!(caller.file = file, caller.line = line, "{}", message),
            Level::Error => tracing::error!(caller.file = file, caller.line = line, "{}", message),
        }
        Ok(())
    }
}
