//! HTTP-level error types.
//!
//! - [`HttpResponseError`]: a non-2xx response whose body is not a GraphQL
//!   envelope
//! - [`HttpError`]: unified error for everything that can go wrong before a
//!   GraphQL body is available

use thiserror::Error;

/// Error returned when the endpoint answers with a non-successful status and
/// no GraphQL body.
///
/// # Example
///
/// ```rust
/// use vineo_client::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 502,
///     message: "Bad Gateway".to_string(),
///     error_reference: None,
/// };
/// assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, or the status reason when the body is empty.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Unified error type for transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response without a GraphQL body.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The request could not be built or sent, or the body could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_includes_status_code_in_message() {
        let error = HttpResponseError {
            code: 503,
            message: "Service Unavailable".to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_http_error_response_is_transparent() {
        let error = HttpError::Response(HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            error_reference: Some("req-1".to_string()),
        });
        assert_eq!(error.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
            error_reference: None,
        };
        let _ = error;
    }
}
