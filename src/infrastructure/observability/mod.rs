//! Observability infrastructure - Prometheus metrics

mod prometheus;

pub use prometheus::{create_metrics_router, init_metrics, record_http_request, PrometheusMetrics};
