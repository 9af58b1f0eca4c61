//! Shared library for the auth gateway and authentication services.
//!
//! This crate provides centralized implementations for:
//! - Request/response DTOs and boundary validation
//! - JWT claims, signing and bearer verification
//! - Environment-based configuration helpers
//! - Tracing subscriber setup
//! - Shutdown signal handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dto;
pub mod env;
pub mod error;
pub mod jwt;
pub mod shutdown;
pub mod tracing_config;

pub use dto::{CreateUser, LoginCredentials, LoginResponse, UserView};
pub use error::PlatformError;
pub use jwt::{Claims, JwtConfig, JwtService};
pub use tracing_config::{TracingConfig, init_tracing};
