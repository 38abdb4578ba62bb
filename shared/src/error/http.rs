//! HTTP status classification
//!
//! The backend client classifies a remote failure by its status.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Classify a status returned by the backend
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::ValidationFailed,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::TimeoutError,
            s if s.is_success() => Self::Success,
            _ => Self::RemoteError,
        }
    }
}
