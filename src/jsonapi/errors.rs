//! Error type for encoding and decoding JSON:API documents.

use thiserror::Error;

/// Errors raised by the document codec.
///
/// The request engine wraps these as
/// [`ResourceError::Serialization`](crate::rest::ResourceError::Serialization)
/// when encoding a payload, as
/// [`ResourceError::Parse`](crate::rest::ResourceError::Parse) when decoding a
/// response, and as [`ResourceError::Handler`](crate::rest::ResourceError::Handler)
/// when unmarshaling onto a caller's object fails.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The body is not syntactically valid JSON.
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The top level of the body is not a JSON object.
    #[error("top-level document must be a JSON object")]
    NotAnObject,

    /// The `data` member has the wrong shape for the decoding mode.
    #[error("expected `data` to be {expected}, found {found}")]
    UnexpectedData {
        /// What the mode accepts.
        expected: &'static str,
        /// The JSON kind that was found.
        found: &'static str,
    },

    /// A document member has the wrong shape.
    #[error("`{member}` must be {expected}")]
    InvalidMember {
        /// The member name.
        member: &'static str,
        /// The expected shape.
        expected: &'static str,
    },

    /// A resource object lacks a required member.
    #[error("resource object is missing `{member}`")]
    MissingMember {
        /// The missing member (`type` or `id`).
        member: &'static str,
    },

    /// A resource could not be represented because its type or id is empty.
    #[error("{resource_type:?} object has an empty type or id")]
    EmptyIdentity {
        /// The resource type reported by the object.
        resource_type: String,
    },

    /// A resource did not serialize to a JSON object.
    #[error("attributes of {resource_type:?} must serialize to a JSON object")]
    AttributesNotAnObject {
        /// The resource type being encoded.
        resource_type: String,
    },

    /// Attribute values could not be converted to or from the resource type.
    #[error("attributes could not be converted: {0}")]
    Attributes(#[source] serde_json::Error),

    /// A representation was unmarshaled onto a resource of another type.
    #[error("cannot unmarshal {found:?} onto {expected:?}")]
    TypeMismatch {
        /// The target resource type.
        expected: &'static str,
        /// The representation's type.
        found: String,
    },

    /// A single resource was expected but `data` was empty.
    #[error("document contains no resource object")]
    MissingData,
}

// Verify DocumentError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DocumentError>();
};
