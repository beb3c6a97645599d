//! Path resolution for nested resources.
//!
//! Every resource has a collection path and a detail path. Top-level
//! resources are mounted at the API root; nested resources are mounted under
//! their parent's detail path:
//!
//! - `/resource-groups` and `/resource-groups/{name}`
//! - `/resource-groups/{name}/sites` and `/resource-groups/{name}/sites/{name}`
//!
//! Segments are stored raw and percent-encoded when the path is rendered.
//!
//! # Example
//!
//! ```rust
//! use kel_api::rest::{collection_path, detail_path};
//! use kel_api::resources::{ResourceGroup, Site};
//!
//! let group = detail_path::<ResourceGroup>(None, "acme").unwrap();
//! assert_eq!(group.to_string(), "/resource-groups/acme");
//!
//! let sites = collection_path::<Site>(Some(&group)).unwrap();
//! assert_eq!(sites.to_string(), "/resource-groups/acme/sites");
//! ```

use std::fmt;

use crate::rest::{Resource, ResourceError};

/// An ordered list of path segments, relative to the API base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Returns the empty path (the API root).
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns the raw (unencoded) segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the last segment, or `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns `true` for the API root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders the path as sent on the wire (`/seg1/seg2`).
    #[must_use]
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", urlencoding::encode(segment))?;
        }
        Ok(())
    }
}

/// Computes the collection path of `R`.
///
/// # Errors
///
/// Returns [`ResourceError::PathResolutionFailed`] if `R` is nested and no
/// parent is given, or if `R` is top-level and a parent is given.
pub fn collection_path<R: Resource>(
    parent: Option<&ResourcePath>,
) -> Result<ResourcePath, ResourceError> {
    match (R::PARENT_TYPE, parent) {
        (None, None) => Ok(ResourcePath::root().join(R::RESOURCE_TYPE)),
        (Some(_), Some(parent)) => Ok(parent.join(R::RESOURCE_TYPE)),
        (Some(parent_type), None) => Err(ResourceError::PathResolutionFailed {
            resource: R::NAME,
            reason: format!("a parent {parent_type} is required"),
        }),
        (None, Some(parent)) => Err(ResourceError::PathResolutionFailed {
            resource: R::NAME,
            reason: format!("top-level resource cannot be nested under {parent}"),
        }),
    }
}

/// Computes the detail path of `R`: parent segments, the collection segment,
/// then `id`.
///
/// # Errors
///
/// Returns [`ResourceError::Validation`] if `id` is empty, or any error from
/// [`collection_path`].
pub fn detail_path<R: Resource>(
    parent: Option<&ResourcePath>,
    id: &str,
) -> Result<ResourcePath, ResourceError> {
    if id.is_empty() {
        return Err(ResourceError::Validation {
            message: format!("{} has an empty {}", R::NAME, R::ID_ATTRIBUTE),
        });
    }
    Ok(collection_path::<R>(parent)?.join(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Shelf {
        name: String,
    }

    impl Resource for Shelf {
        const RESOURCE_TYPE: &'static str = "shelves";
        const NAME: &'static str = "Shelf";
        const ID_ATTRIBUTE: &'static str = "name";

        fn id(&self) -> &str {
            &self.name
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Book {
        title: String,
    }

    impl Resource for Book {
        const RESOURCE_TYPE: &'static str = "books";
        const NAME: &'static str = "Book";
        const ID_ATTRIBUTE: &'static str = "title";
        const PARENT_TYPE: Option<&'static str> = Some("shelves");

        fn id(&self) -> &str {
            &self.title
        }
    }

    #[test]
    fn test_root_renders_as_slash() {
        assert_eq!(ResourcePath::root().to_string(), "/");
        assert!(ResourcePath::root().is_root());
        assert_eq!(ResourcePath::root().last(), None);
    }

    #[test]
    fn test_top_level_collection_and_detail() {
        let collection = collection_path::<Shelf>(None).unwrap();
        assert_eq!(collection.as_string(), "/shelves");

        let detail = detail_path::<Shelf>(None, "top").unwrap();
        assert_eq!(detail.as_string(), "/shelves/top");
        assert_eq!(detail.last(), Some("top"));
    }

    #[test]
    fn test_detail_path_is_parent_then_collection_then_id() {
        for (parent_id, id) in [("a", "b"), ("top", "dune"), ("x-1", "y_2")] {
            let parent = detail_path::<Shelf>(None, parent_id).unwrap();
            let detail = detail_path::<Book>(Some(&parent), id).unwrap();

            let mut expected = parent.segments().to_vec();
            expected.push("books".to_string());
            expected.push(id.to_string());
            assert_eq!(detail.segments(), expected.as_slice());
        }
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let path = detail_path::<Shelf>(None, "a b/c").unwrap();
        assert_eq!(path.to_string(), "/shelves/a%20b%2Fc");
        assert_eq!(path.last(), Some("a b/c"));
    }

    #[test]
    fn test_nested_resource_requires_parent() {
        let error = collection_path::<Book>(None).unwrap_err();
        assert!(matches!(
            error,
            ResourceError::PathResolutionFailed { resource: "Book", .. }
        ));
    }

    #[test]
    fn test_top_level_resource_rejects_parent() {
        let parent = detail_path::<Shelf>(None, "top").unwrap();
        let error = collection_path::<Shelf>(Some(&parent)).unwrap_err();
        assert!(error.to_string().contains("/shelves/top"));
    }

    #[test]
    fn test_empty_id_is_a_validation_error() {
        let error = detail_path::<Shelf>(None, "").unwrap_err();
        assert!(matches!(
            error,
            ResourceError::Validation { message } if message == "Shelf has an empty name"
        ));
    }
}
