//! Test fixtures with sample data.

use rust_common::{CreateUser, JwtConfig, LoginCredentials};
use std::time::Duration;

/// Signing secret shared by test services and test clients.
pub const TEST_JWT_SECRET: &str = "test-secret-do-not-use-in-production";

/// Token lifetime for test services.
pub const TEST_JWT_TTL: Duration = Duration::from_secs(3600);

/// Signing configuration for tests.
#[must_use]
pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_JWT_SECRET, TEST_JWT_TTL)
}

/// The reference user `{name: "A", email: "a@x.com", password: "abcdef"}`.
#[must_use]
pub fn sample_user() -> CreateUser {
    user("A", "a@x.com", "abcdef")
}

/// Build a registration payload.
#[must_use]
pub fn user(name: &str, email: &str, password: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Credentials matching [`sample_user`].
#[must_use]
pub fn sample_credentials() -> LoginCredentials {
    LoginCredentials::new("a@x.com", "abcdef")
}

/// JSON body for `POST /auth/register`.
#[must_use]
pub fn register_body(user: &CreateUser) -> String {
    serde_json::json!({
        "name": user.name,
        "email": user.email,
        "password": user.password,
    })
    .to_string()
}

/// JSON body for `POST /auth/login`.
#[must_use]
pub fn login_body(email: &str, password: &str) -> String {
    serde_json::json!({ "email": email, "password": password }).to_string()
}
