//! Error type for REST calls against the content backend.
//!
//! ERROR HANDLING
//! ==============
//! Every `HttpApi` call maps transport, status and decode failures into
//! `ApiError`. Stores turn it into a user-facing message with
//! [`ApiError::message_or`] so only backend-authored text or a fixed fallback
//! ever reaches the UI.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by backend API calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a failure status or `success: false`.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected envelope.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No browser environment (server-side rendering).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Message to show the user: the backend's own text for rejections,
    /// otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }

    /// HTTP status for rejections, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
