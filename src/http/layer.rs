//! Access logging as a tower layer, for any `Service<Request<_>>`.
//!
//! # Responsibilities
//! - Time each request from before the inner service is called until its
//!   response is ready
//! - Observe the status the inner service produced (200 unless it says
//!   otherwise)
//! - Emit one line per request: `<proto> from <remote> <status> <method>
//!   <uri> <elapsed> <size>`
//!
//! # Design Decisions
//! - Flags are read when the response is ready, not when the layer is built
//! - Response bodies pass through untouched; the size is whatever the
//!   `Content-Length` header claims

use axum::http::{Request, Response, StatusCode};
use futures_util::future::BoxFuture;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

use crate::http::access_log::{emit, response_size, AccessLogEntry, AccessLogFlags};
use crate::logging::LoggerRef;

/// Layer that wraps services with [`AccessLog`].
#[derive(Clone, Debug, Default)]
pub struct AccessLogLayer {
    logger: LoggerRef,
    flags: AccessLogFlags,
}

impl AccessLogLayer {
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

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLog<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLog {
            inner,
            logger: self.logger.clone(),
            flags: self.flags.clone(),
        }
    }
}

/// Service produced by [`AccessLogLayer`].
#[derive(Clone, Debug)]
pub struct AccessLog<S> {
    inner: S,
    logger: LoggerRef,
    flags: AccessLogFlags,
}

/// The status a wrapped service reported. Starts at 200 so a service that
/// never produces a response still logs as OK.
#[derive(Debug, Clone, Copy)]
struct StatusRecorder {
    status: StatusCode,
}

impl Default for StatusRecorder {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
        }
    }
}

impl StatusRecorder {
    fn record<B>(&mut self, response: &Response<B>) {
        self.status = response.status();
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AccessLog<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let mut entry = AccessLogEntry::from_request(&req);
        let logger = self.logger.clone();
        let flags = self.flags.clone();
        let future = self.inner.call(req);

        Box::pin(async move {
            let mut recorder = StatusRecorder::default();
            let result = future.await;
            entry.elapsed = start.elapsed();

            let logger = logger.get();
            if let Ok(response) = &result {
                recorder.record(response);
                entry.size = response_size(response.headers(), &logger);
            }
            entry.status = Some(recorder.status);

            emit(&entry, &flags, &logger);
            result
        })
    }
}
