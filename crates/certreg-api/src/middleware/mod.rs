//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`metrics`]: Prometheus request metrics.
//!
//! Request tracing is `tower_http::trace::TraceLayer`, applied in [`crate::app`].

pub mod metrics;
