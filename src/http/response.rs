//! Response encoding and error-to-status mapping.
//!
//! - Winning envelope → 200, pretty-printed JSON
//! - Malformed key → 400, rejected before any provider is contacted
//! - Race without a usable answer → 504 Gateway Timeout, no payload

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::lookup::KeyError;
use crate::observability::metrics;

/// Errors surfaced to lookup callers.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    #[error("Timeout!")]
    TimedOut,

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            LookupError::TimedOut => StatusCode::GATEWAY_TIMEOUT,
            LookupError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        if let LookupError::Encode(e) = &self {
            tracing::error!(error = %e, "Failed to encode lookup response");
        }
        (self.status(), self.to_string()).into_response()
    }
}

impl IntoResponse for KeyError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected lookup key");
        metrics::record_lookup("invalid_key");
        LookupError::InvalidKey(self).into_response()
    }
}

/// Serialize `value` as indented JSON with a 200 status.
pub fn pretty_json<T: Serialize>(value: &T) -> Result<Response, LookupError> {
    let body = serde_json::to_vec_pretty(value)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
