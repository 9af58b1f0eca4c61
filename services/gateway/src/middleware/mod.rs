//! Request middleware and extractors.

pub mod auth;
pub mod metrics;
pub mod rate_limit;

pub use auth::{AuthUser, RequireBearer};
pub use metrics::track_metrics;
pub use rate_limit::rate_limit;
