use authentication_service::cache::RedisCache;
use authentication_service::password::BcryptHasher;
use authentication_service::store::MongoUserStore;
use authentication_service::{AuthenticationService, AuthenticationServiceImpl, Config};
use rust_common::shutdown::{run_with_grace, triggered};
use rust_common::{JwtService, TracingConfig, init_tracing};
use std::sync::Arc;
use tokio::sync::oneshot;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&TracingConfig::from_env("authentication-service"));

    info!(?config, "Starting Authentication Service");

    let users = MongoUserStore::connect(&config.mongo_uri, config.mongo_database.as_deref()).await?;
    let cache = RedisCache::connect(&config.redis_url()).await?;

    let hasher = BcryptHasher::new(config.bcrypt_cost);
    let jwt = JwtService::new(config.jwt.clone());
    info!(
        bcrypt_cost = hasher.cost(),
        token_ttl_secs = jwt.expiration().as_secs(),
        "Credential settings loaded"
    );

    let service = AuthenticationService::new(
        Arc::new(users),
        Arc::new(cache),
        Arc::new(hasher),
        Arc::new(jwt),
    );

    let addr = config.bind_addr()?;
    let (trigger, stop) = oneshot::channel();
    let server = Server::builder()
        .add_service(AuthenticationServiceImpl::new(Arc::new(service)).into_server())
        .serve_with_shutdown(addr, triggered(stop));

    info!(%addr, "Authentication Service listening");
    run_with_grace(server, trigger, config.shutdown_timeout).await?;

    info!("Authentication Service stopped");
    Ok(())
}
