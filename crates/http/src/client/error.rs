//! Client error types

use clinic_core::CoreError;
use std::time::Duration;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure, no response received
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// No response within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Session expired or invalid (401)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other error status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input rejected before sending
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Reading or writing the session failed
    #[error("Session error: {0}")]
    Session(#[from] CoreError),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Classify a transport error, separating out timeouts
    pub(crate) fn from_transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Request(error)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status behind this error, if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human readable message out of an error body
///
/// The backend answers `{"detail": "..."}`; validation failures carry a list
/// under `detail` instead, in which case the raw body is kept.
pub(crate) fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .map_or_else(|| status.to_string(), str::to_string);
    }

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        assert!(ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()).is_unauthorized());
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "gone".into()),
            ClientError::NotFound(m) if m == "gone"
        ));
        assert_eq!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, String::new()).status(),
            Some(422)
        );
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail":"slot is full"}"#, StatusCode::BAD_REQUEST),
            "slot is full"
        );
        assert_eq!(
            error_message(r#"{"detail":[{"loc":["body"]}]}"#, StatusCode::UNPROCESSABLE_ENTITY),
            r#"{"detail":[{"loc":["body"]}]}"#
        );
        assert_eq!(error_message("plain text", StatusCode::BAD_GATEWAY), "plain text");
        assert_eq!(error_message("", StatusCode::UNAUTHORIZED), "Unauthorized");
    }
}
