//! Utility modules for common functionality.
//!
//! - backoff: Reconnect delay policies
//! - http: Retryable HTTP client construction
//! - logging: Logging utilities
//! - metrics: Metrics utilities

mod backoff;
mod http;

pub mod logging;
pub mod metrics;

pub use backoff::{Backoff, BackoffPolicy};
pub use http::{create_retryable_http_client, HttpRetryConfig};
