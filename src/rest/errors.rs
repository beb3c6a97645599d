//! Error types for resource operations.
//!
//! The request engine maps every outcome of a call to one of these variants:
//!
//! - **400**: [`ResourceError::Validation`] with the server's first error detail
//! - **404** on a Get: [`ResourceError::NotFound`]
//! - **Any other unexpected status**: [`ResourceError::UnexpectedStatus`]
//! - Transport, encoding and decoding failures keep their source error
//!
//! # Example
//!
//! ```rust,ignore
//! use kel_api::rest::ResourceError;
//!
//! match client.resource_groups().get("acme", &mut group).send().await {
//!     Ok(()) => println!("Found: {}", group.name),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{} {} does not exist", resource, id);
//!     }
//!     Err(ResourceError::Validation { message }) => println!("Rejected: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::jsonapi::DocumentError;

/// A boxed error returned by a result handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use kel_api::rest::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "ResourceGroup",
///     id: "ghost".to_string(),
/// };
/// assert_eq!(error.to_string(), "ResourceGroup ghost not found");
///
/// let error = ResourceError::UnexpectedStatus {
///     code: 500,
///     status: "500 Internal Server Error".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "unknown response from API: 500 Internal Server Error"
/// );
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource does not exist (HTTP 404 on a Get).
    #[error("{resource} {id} not found")]
    NotFound {
        /// The resource name (e.g., "Site").
        resource: &'static str,
        /// The identifier that was requested.
        id: String,
    },

    /// The server rejected the request (HTTP 400), or the request could not
    /// be addressed because the object has no identity.
    #[error("{message}")]
    Validation {
        /// The first error detail reported by the server.
        message: String,
    },

    /// The server answered with a status the operation does not expect.
    #[error("unknown response from API: {status}")]
    UnexpectedStatus {
        /// The HTTP status code.
        code: u16,
        /// The status line text (e.g., `500 Internal Server Error`).
        status: String,
    },

    /// A nested resource was addressed without its parent, or a top-level
    /// resource was given one.
    #[error("Cannot resolve path for {resource}: {reason}")]
    PathResolutionFailed {
        /// The resource name.
        resource: &'static str,
        /// What was wrong with the nesting.
        reason: String,
    },

    /// The payload could not be encoded into a document.
    #[error("failed to encode request document: {0}")]
    Serialization(#[source] DocumentError),

    /// The response body could not be decoded.
    #[error("failed to parse response document: {0}")]
    Parse(#[source] DocumentError),

    /// The result handler failed after a successful response.
    #[error("{0}")]
    Handler(#[source] BoxError),

    /// The request could not be sent or its response could not be read.
    #[error(transparent)]
    Transport(#[from] HttpError),
}

impl ResourceError {
    /// Returns the HTTP status code behind this error, if the server answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::UnexpectedStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InvalidHttpRequestError;

    #[test]
    fn test_validation_message_is_verbatim() {
        let error = ResourceError::Validation {
            message: "name too long".to_string(),
        };
        assert_eq!(error.to_string(), "name too long");
    }

    #[test]
    fn test_not_found_names_resource_and_id() {
        let error = ResourceError::NotFound {
            resource: "Site",
            id: "www".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("Site"));
        assert!(message.contains("www"));
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_unexpected_status_message() {
        let error = ResourceError::UnexpectedStatus {
            code: 409,
            status: "409 Conflict".to_string(),
        };
        assert_eq!(error.to_string(), "unknown response from API: 409 Conflict");
        assert_eq!(error.status_code(), Some(409));
    }

    #[test]
    fn test_handler_error_is_surfaced_verbatim() {
        let source: BoxError = "attribute `personal` is not a boolean".into();
        let error = ResourceError::Handler(source);

        assert_eq!(error.to_string(), "attribute `personal` is not a boolean");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_from_http_error_conversion() {
        let http_error = HttpError::InvalidRequest(InvalidHttpRequestError::MissingContentType);
        let error: ResourceError = http_error.into();

        assert!(matches!(error, ResourceError::Transport(_)));
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_codec_errors_keep_their_source() {
        let error = ResourceError::Parse(DocumentError::NotAnObject);
        assert!(error.to_string().contains("JSON object"));
        assert!(std::error::Error::source(&error).is_some());

        let error = ResourceError::Serialization(DocumentError::MissingData);
        assert!(error.to_string().starts_with("failed to encode"));
    }
}
