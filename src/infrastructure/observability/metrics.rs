//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use super::config::MetricsConfig;

static BASE64_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/permalink/[A-Za-z0-9_\-]+=*(/|$)").unwrap());
static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("nlp_demo_gateway_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path: config.path.clone(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();
    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Parameters for upstream model request metrics
pub struct UpstreamMetricParams<'a> {
    pub model: &'a str,
    pub verb: &'a str,
    pub duration: Duration,
    pub success: bool,
}

/// Record a request forwarded to a model server
pub fn record_upstream_request(params: UpstreamMetricParams) {
    let labels = [
        ("model", params.model.to_string()),
        ("verb", params.verb.to_string()),
        ("status", if params.success { "success" } else { "error" }.to_string()),
    ];

    counter!("upstream_requests_total", &labels).increment(1);
    histogram!("upstream_request_duration_seconds", &labels).record(params.duration.as_secs_f64());

    if !params.success {
        counter!("upstream_errors_total", &labels).increment(1);
    }
}

/// Record a response cache lookup
pub fn record_cache_lookup(model: &str, verb: &str, hit: bool) {
    let labels = [
        ("model", model.to_string()),
        ("verb", verb.to_string()),
        ("result", if hit { "hit" } else { "miss" }.to_string()),
    ];

    counter!("response_cache_lookups_total", &labels).increment(1);
}

/// Keep metric label cardinality bounded: slugs and numeric ids become `{id}`
fn sanitize_path(path: &str) -> String {
    let path = BASE64_SEGMENT.replace_all(path, "/permalink/{id}$1");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    if path.len() > 50 {
        path.chars().take(50).collect()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_permalink_slug() {
        assert_eq!(
            sanitize_path("/api/permalink/MTA1Mjc3NA=="),
            "/api/permalink/{id}"
        );
    }

    #[test]
    fn test_sanitize_path_numeric_id() {
        assert_eq!(sanitize_path("/api/things/123/parts"), "/api/things/{id}/parts");
    }

    #[test]
    fn test_sanitize_path_keeps_model_routes() {
        assert_eq!(
            sanitize_path("/api/bidaf-elmo/interpret/simple_gradient"),
            "/api/bidaf-elmo/interpret/simple_gradient"
        );
        assert_eq!(sanitize_path("/health"), "/health");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert!(sanitize_path(path).len() <= 50);
    }
}
