//! Access-log entries and the live toggles that route them.

use axum::extract::ConnectInfo;
use axum::http::header::CONTENT_LENGTH;
use axum::http::{HeaderMap, Method, Request, StatusCode, Version};
use std::fmt;
use std::net::SocketAddr;
use std::num::ParseIntError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::humanize::{Bytes, Elapsed};
use crate::logging::{Level, Logger};

/// Runtime switches read on every request.
///
/// Clones share state, so the owner can flip them while the server runs.
#[derive(Clone, Debug, Default)]
pub struct AccessLogFlags {
    verbose: Arc<AtomicBool>,
    access_log: Arc<AtomicBool>,
}

impl AccessLogFlags {
    pub fn new(verbose: bool, access_log: bool) -> Self {
        Self {
            verbose: Arc::new(AtomicBool::new(verbose)),
            access_log: Arc::new(AtomicBool::new(access_log)),
        }
    }

    pub fn verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    pub fn access_log(&self) -> bool {
        self.access_log.load(Ordering::Relaxed)
    }

    pub fn set_access_log(&self, access_log: bool) {
        self.access_log.store(access_log, Ordering::Relaxed);
    }

    /// Info when access logging is on and verbose is off, Debug otherwise.
    pub fn level(&self) -> Level {
        if self.access_log() && !self.verbose() {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

/// One summarized request/response exchange.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub version: Version,
    pub remote_addr: String,
    /// Omitted from the line when `None`.
    pub status: Option<StatusCode>,
    pub method: Method,
    pub uri: String,
    pub elapsed: Duration,
    pub size: u64,
}

impl AccessLogEntry {
    /// Capture the request side of an entry. Response fields start empty.
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let remote_addr = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_default();

        let uri = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.uri().to_string());

        Self {
            version: req.version(),
            remote_addr,
            status: None,
            method: req.method().clone(),
            uri,
            elapsed: Duration::ZERO,
            size: 0,
        }
    }
}

impl fmt::Display for AccessLogEntry {
    /// `<proto> from <remote> [<status> ]<method> <uri> <elapsed> <size>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} from {} ", self.version, self.remote_addr)?;
        if let Some(status) = self.status {
            write!(f, "{} ", status.as_u16())?;
        }
        write!(
            f,
            "{} {} {} {}",
            self.method,
            self.uri,
            Elapsed(self.elapsed),
            Bytes(self.size)
        )
    }
}

#[derive(Debug, Error)]
pub enum ContentLengthError {
    #[error("Content-Length is not visible ASCII")]
    NotAscii,
    #[error("Content-Length `{value}` is not an integer: {source}")]
    Invalid {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parse the `Content-Length` response header.
///
/// `Ok(None)` when the header is absent.
pub fn content_length(headers: &HeaderMap) -> Result<Option<u64>, ContentLengthError> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| ContentLengthError::NotAscii)?;
    value
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|source| ContentLengthError::Invalid {
            value: value.to_string(),
            source,
        })
}

/// Response size for the access log: the `Content-Length` value, or 0 when
/// it is absent or unparsable (the latter is reported on the error path).
#[track_caller]
pub(crate) fn response_size(headers: &HeaderMap, logger: &Logger) -> u64 {
    match content_length(headers) {
        Ok(size) => size.unwrap_or(0),
        Err(e) => {
            crate::errorf!(logger: logger, "content-length parse error: {}", e);
            0
        }
    }
}

/// Emit an entry at the level the flags select.
#[track_caller]
pub(crate) fn emit(entry: &AccessLogEntry, flags: &AccessLogFlags, logger: &Logger) {
    logger.logf(flags.level(), format_args!("{}", entry));
}
