//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_auth_attempt, record_http_request,
    AuthOutcome, PrometheusMetrics,
};
