//! HTTP access logging.
//!
//! # Data Flow
//! ```text
//! request
//!     → layer.rs / middleware.rs (start timer, capture request side)
//!     → wrapped handler
//!     → access_log.rs (status, Content-Length, line rendering)
//!     → logging façade at Info or Debug, per AccessLogFlags
//! ```
//!
//! # Design Decisions
//! - Two entry points: a tower layer (line includes the status) and an axum
//!   `from_fn` middleware (no status, size for POST only)
//! - The remote address comes from `ConnectInfo<SocketAddr>`; serve with
//!   `into_make_service_with_connect_info` to populate it

pub mod access_log;
pub mod layer;
pub mod middleware;

pub use access_log::{content_length, AccessLogEntry, AccessLogFlags, ContentLengthError};
pub use layer::{AccessLog, AccessLogLayer};
pub use middleware::{access_log_middleware, AccessLogState};
