//! Fixed-window request throttle.
//!
//! Each client gets `limit` requests per `window`. The window starts at the
//! client's first request and resets once it has fully elapsed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Rate limit decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request allowed
    Allowed {
        /// Requests left in the current window
        remaining: u32,
    },
    /// Request denied with retry-after duration
    Denied {
        /// Time until the window resets
        retry_after: Duration,
    },
}

/// Rate limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per window
    pub limit: u32,
    /// Window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ClientWindow {
    request_count: u32,
    window_start: Instant,
}

/// Per-client fixed-window counter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    clients: Arc<RwLock<HashMap<String, ClientWindow>>>,
}

impl RateLimiter {
    /// Create a limiter with the given configuration.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Configured limit.
    #[must_use]
    pub const fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Count a request from `client_id` and decide whether it may proceed.
    pub async fn check(&self, client_id: &str) -> RateLimitDecision {
        self.check_at(client_id, Instant::now()).await
    }

    async fn check_at(&self, client_id: &str, now: Instant) -> RateLimitDecision {
        let mut clients = self.clients.write().await;
        let state = clients
            .entry(client_id.to_string())
            .or_insert(ClientWindow {
                request_count: 0,
                window_start: now,
            });

        let elapsed = now.saturating_duration_since(state.window_start);
        if elapsed >= self.config.window {
            state.request_count = 0;
            state.window_start = now;
        }

        if state.request_count >= self.config.limit {
            let retry_after = self
                .config
                .window
                .checked_sub(now.saturating_duration_since(state.window_start))
                .unwrap_or(Duration::from_secs(1));
            return RateLimitDecision::Denied { retry_after };
        }

        state.request_count += 1;
        RateLimitDecision::Allowed {
            remaining: self.config.limit - state.request_count,
        }
    }

    /// Drop clients whose window has expired. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now()).await
    }

    async fn purge_expired_at(&self, now: Instant) -> usize {
        let mut clients = self.clients.write().await;
        let before = clients.len();
        clients.retain(|_, state| {
            now.saturating_duration_since(state.window_start) < self.config.window
        });
        before - clients.len()
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.clients.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(limit: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            limit,
            window: Duration::from_secs(window_secs),
        })
    }

    #[tokio::test]
    async fn test_eleventh_request_denied() {
        let limiter = limiter(10, 60);
        let now = Instant::now();

        for i in 0..10 {
            assert_eq!(
                limiter.check_at("1.2.3.4", now).await,
                RateLimitDecision::Allowed { remaining: 9 - i }
            );
        }
        assert!(matches!(
            limiter.check_at("1.2.3.4", now).await,
            RateLimitDecision::Denied { retry_after } if retry_after == Duration::from_secs(60)
        ));
    }

    #[tokio::test]
    async fn test_clients_are_independent() {
        let limiter = limiter(1, 60);
        let now = Instant::now();

        assert!(matches!(limiter.check_at("a", now).await, RateLimitDecision::Allowed { .. }));
        assert!(matches!(limiter.check_at("a", now).await, RateLimitDecision::Denied { .. }));
        assert!(matches!(limiter.check_at("b", now).await, RateLimitDecision::Allowed { .. }));
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limiter = limiter(2, 60);
        let start = Instant::now();

        limiter.check_at("a", start).await;
        limiter.check_at("a", start).await;

        let later = start + Duration::from_secs(45);
        assert!(matches!(
            limiter.check_at("a", later).await,
            RateLimitDecision::Denied { retry_after } if retry_after == Duration::from_secs(15)
        ));

        let next_window = start + Duration::from_secs(60);
        assert_eq!(
            limiter.check_at("a", next_window).await,
            RateLimitDecision::Allowed { remaining: 1 }
        );
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let limiter = limiter(5, 60);
        let start = Instant::now();

        limiter.check_at("old", start).await;
        limiter.check_at("new", start + Duration::from_secs(30)).await;

        let removed = limiter
            .purge_expired_at(start + Duration::from_secs(61))
            .await;
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}
