//! Per-verb status code dispatch.
//!
//! | Verb   | Method | Success       | 400        | 404        | Other      |
//! |--------|--------|---------------|------------|------------|------------|
//! | Create | POST   | 201           | Validation | Unexpected | Unexpected |
//! | List   | GET    | 200           | Validation | Unexpected | Unexpected |
//! | Get    | GET    | 200           | Validation | NotFound   | Unexpected |
//! | Update | PATCH  | 200           | Validation | Unexpected | Unexpected |
//! | Delete | DELETE | 200, 202, 204 | Validation | Unexpected | Unexpected |
//!
//! A Delete answered with 204 never has its body parsed.

use std::fmt;

use crate::clients::HttpMethod;
use crate::jsonapi::DocumentMode;

/// The five operations the engine knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Create a resource (POST on the collection).
    Create,
    /// List a collection (GET on the collection).
    List,
    /// Fetch one resource (GET on the detail path).
    Get,
    /// Update a resource (PATCH on the detail path).
    Update,
    /// Delete a resource (DELETE on the detail path).
    Delete,
}

/// What a status code means for a given verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Hand the document to the result handler.
    Success,
    /// The server rejected the request; report its first error detail.
    Validation,
    /// The requested resource does not exist.
    NotFound,
    /// The status is not part of this verb's contract.
    Unexpected,
}

impl Verb {
    /// All verbs, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Create,
        Self::List,
        Self::Get,
        Self::Update,
        Self::Delete,
    ];

    /// Returns the HTTP method this verb is sent with.
    #[must_use]
    pub const fn http_method(self) -> HttpMethod {
        match self {
            Self::Create => HttpMethod::Post,
            Self::List | Self::Get => HttpMethod::Get,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the verb name in lowercase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns how the response body is decoded.
    #[must_use]
    pub const fn document_mode(self) -> DocumentMode {
        match self {
            Self::List => DocumentMode::List,
            _ => DocumentMode::Single,
        }
    }

    /// Returns `true` if the request carries an encoded payload.
    #[must_use]
    pub const fn has_payload(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    /// Returns the status codes that count as success.
    #[must_use]
    pub const fn success_codes(self) -> &'static [u16] {
        match self {
            Self::Create => &[201],
            Self::List | Self::Get | Self::Update => &[200],
            Self::Delete => &[200, 202, 204],
        }
    }

    /// Classifies a response status for this verb. Defined for every code.
    #[must_use]
    pub fn dispatch(self, code: u16) -> Outcome {
        if self.success_codes().contains(&code) {
            return Outcome::Success;
        }
        match (self, code) {
            (_, 400) => Outcome::Validation,
            (Self::Get, 404) => Outcome::NotFound,
            _ => Outcome::Unexpected,
        }
    }

    /// Returns `true` when the response must not be parsed at all.
    #[must_use]
    pub const fn skips_body(self, code: u16) -> bool {
        matches!((self, code), (Self::Delete, 204))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
