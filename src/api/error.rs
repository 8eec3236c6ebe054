//! API Error Types
//!
//! Errors raised by the JSON-fetch helper. The dashboard refresher collapses
//! all of them into a single logged message; other callers get them as-is.

use thiserror::Error;

/// API client error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Transport failure, propagated unmodified
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint could not be joined onto the base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Status code carried by an HTTP error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ApiError::Http { status: 500 };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::Parse(_)));
        assert_eq!(err.status(), None);
    }
}
