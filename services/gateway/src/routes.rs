//! HTTP handlers.
//!
//! Each handler forwards one request to the matching authentication service
//! command. Registration and listing failures answer 400, login failures 401.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use rust_common::{CreateUser, LoginCredentials, LoginResponse, UserView};
use tracing::{debug, info};

use crate::error::{GatewayError, rpc_message};
use crate::extract::Json;
use crate::middleware::RequireBearer;
use crate::state::AppState;

/// `POST /auth/register`
///
/// # Errors
///
/// Returns 400 when the payload is invalid or the service rejects it.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, axum::Json<UserView>), GatewayError> {
    input
        .validate()
        .map_err(|e| GatewayError::bad_request(e.to_string()))?;

    let user = state
        .auth
        .register(input)
        .await
        .map_err(|status| GatewayError::bad_request(rpc_message(&status)))?;

    info!(user_id = %user.id, "Registered user");
    Ok((StatusCode::CREATED, axum::Json(user)))
}

/// `POST /auth/login`
///
/// # Errors
///
/// Returns 401 when the service rejects the credentials.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginCredentials>,
) -> Result<(StatusCode, axum::Json<LoginResponse>), GatewayError> {
    let response = state
        .auth
        .login(credentials)
        .await
        .map_err(|status| GatewayError::unauthorized(rpc_message(&status)))?;

    Ok((StatusCode::CREATED, axum::Json(response)))
}

/// `GET /auth/users`, bearer-protected.
///
/// # Errors
///
/// Returns 401 without a valid token (via [`RequireBearer`]) and 400 when
/// the service call fails.
pub async fn users(
    State(state): State<AppState>,
    RequireBearer(caller): RequireBearer,
) -> Result<axum::Json<Vec<UserView>>, GatewayError> {
    debug!(user_id = %caller.user_id, "Listing users");

    let users = state
        .auth
        .get_users()
        .await
        .map_err(|status| GatewayError::bad_request(rpc_message(&status)))?;

    Ok(axum::Json(users))
}

/// `GET /metrics`
///
/// # Errors
///
/// Returns 500 if the metrics cannot be encoded.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let body = state.metrics.render()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
