//! Errors raised while forwarding a request to the backend.
//!
//! Bodies use the backend's `{ success: false, message }` envelope so the
//! browser decodes proxy failures through the same path as backend ones.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The backend did not answer within the configured timeout.
    #[error("backend timed out")]
    Timeout,

    /// Connection refused, DNS failure, or a broken response body.
    #[error("backend unavailable: {0}")]
    Unreachable(String),

    /// Request body exceeded the forwarding limit.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The client's request body stream failed before it was complete.
    #[error("could not read request body: {0}")]
    BodyRead(String),
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unreachable(_) => StatusCode::BAD_GATEWAY,
            Self::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyRead(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Unreachable(err.to_string()) }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "message": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
