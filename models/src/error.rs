//! Classification of failed REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is handled the same way by the UI: show a message, keep
//! prior state, let the user resubmit. The variants only decide *which*
//! message and whether field errors are mapped back onto a form.

use crate::validation::FieldErrors;

/// Error returned by REST helpers in both clients.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status without a more specific meaning.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// `422` with per-field messages.
    #[error("validation failed: {}", .0.summary())]
    Validation(FieldErrors),

    /// `404`.
    #[error("not found")]
    NotFound,

    /// `401` or `403`.
    #[error("not authorized")]
    Unauthorized,

    /// `2xx` envelope with `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// The body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable text for toast notifications.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
            Self::Http { message, .. } | Self::Rejected { message } => message.clone(),
            Self::Validation(errors) if !errors.is_empty() => errors.summary(),
            Self::Validation(_) => "Some fields are invalid.".to_owned(),
            Self::NotFound => "The requested item no longer exists.".to_owned(),
            Self::Unauthorized => "You are not allowed to do that. Try signing in again.".to_owned(),
            Self::Decode(_) => "The server sent an unexpected response.".to_owned(),
        }
    }

    /// Field errors to map back onto the originating form, if any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
