//! Transport error types for the Kel API client.
//!
//! # Error Handling
//!
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport failures
//!
//! Non-2xx responses are not errors at this layer. The request engine in
//! [`crate::rest`] decides what each status code means for each operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use kel_api::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status: {}", response.status),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::InvalidHeader { name }) => println!("Bad header: {}", name),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST/PATCH requests
/// - Body provided without a content type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the content type.
    #[error("Cannot set a body without also setting content_type.")]
    MissingContentType,

    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for transport failures.
///
/// Any of these means the request never produced a readable response.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A header name or value could not be encoded on the wire.
    #[error("Invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// Network or connection error, including failure to read the body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "patch".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot use patch without specifying data."
        );
    }

    #[test]
    fn test_invalid_request_error_missing_content_type() {
        let error = InvalidHttpRequestError::MissingContentType;
        assert_eq!(
            error.to_string(),
            "Cannot set a body without also setting content_type."
        );
    }

    #[test]
    fn test_invalid_header_mentions_name() {
        let error = HttpError::InvalidHeader {
            name: "X-Bad\n".to_string(),
        };
        assert!(error.to_string().contains("X-Bad"));
    }

    #[test]
    fn test_http_error_wraps_invalid_request() {
        let error: HttpError = InvalidHttpRequestError::MissingContentType.into();
        assert!(matches!(error, HttpError::InvalidRequest(_)));
    }
}
