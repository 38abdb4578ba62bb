//! Client error types

use reqwest::StatusCode;
use shared::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the payload (400 / 422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Map to the unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Server { status, .. } => StatusCode::from_u16(*status)
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::RemoteError),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ClientError::NotFound("x".into()).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            ClientError::Validation("bad".into()).code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ClientError::Server {
                status: 500,
                body: "boom".into()
            }
            .code(),
            ErrorCode::RemoteError
        );
        assert_eq!(
            ClientError::Server {
                status: 504,
                body: String::new()
            }
            .code(),
            ErrorCode::TimeoutError
        );
        assert_eq!(
            ClientError::Server {
                status: 409,
                body: "duplicate".into()
            }
            .code(),
            ErrorCode::AlreadyExists
        );
    }

    #[test]
    fn test_display() {
        let err = ClientError::Server {
            status: 502,
            body: "upstream".into(),
        };
        assert_eq!(err.to_string(), "Server error (502): upstream");
    }
}
