//! Gateway Service - public HTTP entry point for authentication.
//!
//! Exposes `/auth/register`, `/auth/login` and the bearer-protected
//! `/auth/users`, forwarding each request to the authentication service over
//! gRPC. Requests are throttled per client address.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod rate_limiter;
pub mod router;
pub mod routes;
pub mod state;

// Include generated protobuf code
#[allow(missing_docs, clippy::pedantic, clippy::nursery)]
pub mod proto {
    tonic::include_proto!("auth.v1");
}

pub use client::{AuthClient, GrpcAuthClient};
pub use config::Config;
pub use error::GatewayError;
pub use router::build_router;
pub use state::AppState;
