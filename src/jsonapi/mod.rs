//! JSON:API document codec.
//!
//! This module maps typed resources to and from the wire envelope the Kel
//! backend speaks:
//!
//! - [`Document`]: the envelope with `data`, `errors` and `included`
//! - [`ResourceRepresentation`]: one entity as transmitted (type, id, attributes)
//! - [`ErrorDetail`]: one entry of the `errors` member
//! - [`DocumentMode`]: whether `data` holds one object or an array
//! - [`DocumentError`]: codec failures
//!
//! # Example
//!
//! ```rust
//! use kel_api::jsonapi::{Document, DocumentMode};
//! use kel_api::resources::ResourceGroup;
//!
//! let group = ResourceGroup::new("acme");
//! let bytes = Document::encode(&group).unwrap().to_vec().unwrap();
//!
//! let decoded = Document::decode(&bytes, DocumentMode::Single).unwrap();
//! assert_eq!(decoded.data[0].resource_type, "resource-groups");
//! assert_eq!(decoded.data[0].id, "acme");
//! ```

mod document;
mod errors;

pub use document::{Document, DocumentMode, ErrorDetail, ResourceRepresentation};
pub use errors::DocumentError;

/// Media type of every request and response body.
pub const CONTENT_TYPE: &str = "application/vnd.api+json";
