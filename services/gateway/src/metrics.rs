//! Prometheus metrics for the gateway.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

const NAMESPACE: &str = "gateway";

/// Request metrics, registered on a private registry.
#[derive(Clone)]
pub struct GatewayMetrics {
    registry: Registry,
    /// Responses by route and status
    pub requests: IntCounterVec,
    /// Latency by route
    pub latency: HistogramVec,
    /// Requests rejected by the throttle
    pub rate_limited: IntCounter,
}

impl GatewayMetrics {
    /// Create and register all metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric cannot be registered.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP responses").namespace(NAMESPACE),
            &["route", "status"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        let latency = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency")
                .namespace(NAMESPACE)
                .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
            &["route"],
        )?;
        registry.register(Box::new(latency.clone()))?;

        let rate_limited = IntCounter::with_opts(
            Opts::new("rate_limited_total", "Requests rejected by the throttle")
                .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(rate_limited.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
            rate_limited,
        })
    }

    /// Record one finished request.
    pub fn observe(&self, route: &str, status: u16, elapsed: Duration) {
        self.requests
            .with_label_values(&[route, &status.to_string()])
            .inc();
        self.latency
            .with_label_values(&[route])
            .observe(elapsed.as_secs_f64());
    }

    /// Render in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
