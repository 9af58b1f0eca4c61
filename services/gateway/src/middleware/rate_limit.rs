//! Throttle middleware.
//!
//! Clients are keyed by peer IP from `ConnectInfo`. Forwarding headers are
//! not trusted; behind a proxy every request shares the proxy's key.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use tracing::warn;

use crate::error::GatewayError;
use crate::rate_limiter::RateLimitDecision;
use crate::state::AppState;

/// Key for requests without connection info (in-process tests).
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// Header carrying the configured limit.
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Header carrying requests left in the window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Count the request against its client and reject it once the window is
/// exhausted.
///
/// # Errors
///
/// Returns [`GatewayError::TooManyRequests`] when the client is over its limit.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let client = client_key(&request);

    match state.limiter.check(&client).await {
        RateLimitDecision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(LIMIT_HEADER, HeaderValue::from(state.limiter.config().limit));
            headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
            Ok(response)
        }
        RateLimitDecision::Denied { retry_after } => {
            warn!(client = %client, path = %request.uri().path(), "Request throttled");
            state.metrics.rate_limited.inc();
            Err(GatewayError::TooManyRequests { retry_after })
        }
    }
}

fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| ANONYMOUS_CLIENT.to_string(), |info| info.0.ip().to_string())
}
