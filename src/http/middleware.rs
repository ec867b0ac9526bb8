//! Access logging as an axum `from_fn` middleware.
//!
//! Logs `<proto> from <remote> <method> <uri> <elapsed> <size>`. Unlike
//! [`AccessLogLayer`](crate::http::AccessLogLayer) the status is not part of
//! the line, and the size is only taken from `POST` responses; every other
//! method reports 0.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::http::access_log::{emit, response_size, AccessLogEntry, AccessLogFlags};
use crate::logging::LoggerRef;

/// State required for [`access_log_middleware`].
#[derive(Clone, Debug, Default)]
pub struct AccessLogState {
    pub logger: LoggerRef,
    pub flags: AccessLogFlags,
}

impl AccessLogState {
    /// Log through the process-wide logger.
    pub fn new(flags: AccessLogFlags) -> Self {
        Self {
            logger: LoggerRef::Global,
            flags,
        }
    }

    /// Log through a specific logger instead of the process-wide one.
    pub fn with_logger(mut self, logger: impl Into<LoggerRef>) -> Self {
        self.logger = logger.into();
        self
    }
}

pub async fn access_log_middleware(
    State(state): State<AccessLogState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let mut entry = AccessLogEntry::from_request(&request);

    let response = next.run(request).await;
    entry.elapsed = start.elapsed();

    let logger = state.logger.get();
    if entry.method == Method::POST {
        entry.size = response_size(response.headers(), &logger);
    }

    emit(&entry, &state.flags, &logger);
    response
}
