//! Route table.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::middleware::{rate_limit, track_metrics};
use crate::routes;
use crate::state::AppState;

/// Build the gateway router.
///
/// The `/auth` routes sit behind the throttle; `/metrics` does not. Every
/// matched route is counted in the metrics.
pub fn build_router(state: AppState) -> Router {
    let auth = Router::new()
        .route("/auth/register", post(routes::register))
        .route("/auth/login", post(routes::login))
        .route("/auth/users", get(routes::users))
        .route_layer(from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .merge(auth)
        .route("/metrics", get(routes::metrics))
        .route_layer(from_fn_with_state(state.clone(), track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
