//! Authentication Service - user registration, cached listing and login.
//!
//! Users live in a MongoDB collection; the full listing is cached in Redis
//! under a single key and invalidated on every registration. Passwords are
//! bcrypt-hashed and logins return an HS256 access token. The service is
//! reached over gRPC (`auth.v1.AuthenticationService`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod error;
pub mod grpc;
pub mod model;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

// Include generated protobuf code
#[allow(missing_docs, clippy::pedantic, clippy::nursery)]
pub mod proto {
    tonic::include_proto!("auth.v1");
}

pub use config::Config;
pub use error::AuthError;
pub use grpc::AuthenticationServiceImpl;
pub use service::AuthenticationService;
