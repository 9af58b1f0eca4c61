//! HTTP error responses.
//!
//! Every error renders as `{"statusCode": <u16>, "message": <string>}`.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tonic::{Code, Status};
use tracing::{error, warn};

/// Message for throttled requests.
pub const TOO_MANY_REQUESTS: &str = "ThrottlerException: Too Many Requests";

/// Message for a missing or unverifiable bearer token.
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code
    pub status_code: u16,
    /// Human-readable reason
    pub message: String,
}

/// Gateway error.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Invalid payload or failed registration/listing
    #[error("{0}")]
    BadRequest(String),

    /// Failed login or bearer check
    #[error("{0}")]
    Unauthorized(String),

    /// Throttle exceeded
    #[error("ThrottlerException: Too Many Requests")]
    TooManyRequests {
        /// Time until the client's window resets
        retry_after: Duration,
    },

    /// Unexpected failure inside the gateway
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Client-facing text for a failed RPC.
///
/// Domain rejections from the authentication service keep their message.
/// Anything else may carry transport or infrastructure detail and is
/// replaced.
#[must_use]
pub fn rpc_message(status: &Status) -> String {
    match status.code() {
        Code::AlreadyExists | Code::Unauthenticated | Code::InvalidArgument => {
            status.message().to_string()
        }
        Code::Unavailable => {
            warn!(detail = %status.message(), "Authentication service unavailable");
            "Authentication service unavailable".to_string()
        }
        code => {
            warn!(?code, detail = %status.message(), "Authentication service call failed");
            "Internal server error".to_string()
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            error!(error = %e, "Internal gateway error");
        }

        let status = self.status_code();
        let body = ErrorBody {
            status_code: status.as_u16(),
            message: self.client_message(),
        };
        let mut response = (status, Json(body)).into_response();

        if let Self::TooManyRequests { retry_after } = self {
            // Round up so clients never retry inside the window.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
