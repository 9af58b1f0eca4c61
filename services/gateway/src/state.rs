//! Shared router state.

use crate::client::AuthClient;
use crate::metrics::GatewayMetrics;
use crate::rate_limiter::{RateLimitConfig, RateLimiter};
use rust_common::JwtService;
use std::sync::Arc;

/// State handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service client
    pub auth: Arc<dyn AuthClient>,
    /// Bearer verification
    pub jwt: Arc<JwtService>,
    /// Per-client throttle
    pub limiter: RateLimiter,
    /// Prometheus metrics
    pub metrics: Arc<GatewayMetrics>,
}

impl AppState {
    /// Assemble state with fresh throttle and metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails.
    pub fn new(
        auth: Arc<dyn AuthClient>,
        jwt: JwtService,
        rate_limit: RateLimitConfig,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            auth,
            jwt: Arc::new(jwt),
            limiter: RateLimiter::new(rate_limit),
            metrics: Arc::new(GatewayMetrics::new()?),
        })
    }
}
