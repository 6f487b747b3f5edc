//! API middleware components

pub mod access;
pub mod http_metrics;
pub mod logging;

pub use access::{access_middleware, PARENT_ACCOUNT_PARAM};
pub use http_metrics::metrics_middleware;
pub use logging::logging_middleware;
