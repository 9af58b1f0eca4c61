use gateway_service::rate_limiter::RateLimitConfig;
use gateway_service::{AppState, Config, GrpcAuthClient, build_router};
use rust_common::shutdown::{run_with_grace, triggered};
use rust_common::{JwtService, TracingConfig, init_tracing};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&TracingConfig::from_env("gateway-service"));

    info!(?config, "Starting Gateway Service");

    let client = GrpcAuthClient::connect_lazy(&config.auth_service_url)?;
    let state = AppState::new(
        Arc::new(client),
        JwtService::new(config.jwt.clone()),
        RateLimitConfig {
            limit: config.rate_limit,
            window: config.rate_limit_window,
        },
    )?;

    let limiter = state.limiter.clone();
    let window = config.rate_limit_window;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(window);
        loop {
            interval.tick().await;
            let removed = limiter.purge_expired().await;
            if removed > 0 {
                debug!(removed, "Purged expired throttle windows");
            }
        }
    });

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let (trigger, stop) = oneshot::channel();
    let server = axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(triggered(stop));

    info!(%addr, upstream = %config.auth_service_url, "Gateway Service listening");
    run_with_grace(server.into_future(), trigger, config.shutdown_timeout).await?;

    info!("Gateway Service stopped");
    Ok(())
}
