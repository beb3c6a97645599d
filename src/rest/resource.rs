//! The [`Resource`] trait shared by every Kel resource type.
//!
//! A resource declares its wire type, the attribute that carries its
//! identifier, and where it is mounted. Everything else (paths, documents,
//! status handling) is derived by the engine.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives and `#[serde(default)]`
//! 2. Implement [`Resource`] with its constants and `id()`
//! 3. Implement either [`RootResource`] or [`NestedResource`]
//!
//! # Example
//!
//! ```rust
//! use kel_api::rest::{NestedResource, Resource};
//! use kel_api::resources::Site;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct Domain {
//!     pub hostname: String,
//! }
//!
//! impl Resource for Domain {
//!     const RESOURCE_TYPE: &'static str = "domains";
//!     const NAME: &'static str = "Domain";
//!     const ID_ATTRIBUTE: &'static str = "hostname";
//!     const PARENT_TYPE: Option<&'static str> = Some(Site::RESOURCE_TYPE);
//!
//!     fn id(&self) -> &str {
//!         &self.hostname
//!     }
//! }
//!
//! impl NestedResource for Domain {
//!     type Parent = Site;
//! }
//! ```

use serde::{de::DeserializeOwned, Serialize};

use crate::rest::ResourceError;

/// A typed Kel resource that can travel through the request engine.
///
/// # Required Bounds
///
/// Resources are serialized to a JSON object to build their attributes, and
/// representations are overlaid onto them through the same JSON shape, so
/// every field should tolerate absence (`#[serde(default)]`).
pub trait Resource: Serialize + DeserializeOwned + Default + Clone + Send + Sync {
    /// The JSON:API `type`, also used as the collection path segment.
    const RESOURCE_TYPE: &'static str;

    /// Human-readable name used in error messages (e.g., "Site").
    const NAME: &'static str;

    /// The attribute key holding the identifier (e.g., `name`).
    ///
    /// This key is moved out of the attributes and into the document's `id`
    /// when encoding, and written back when decoding.
    const ID_ATTRIBUTE: &'static str;

    /// The `RESOURCE_TYPE` of the parent, or `None` for top-level types.
    const PARENT_TYPE: Option<&'static str> = None;

    /// Returns the identifier, empty when not yet assigned.
    fn id(&self) -> &str;

    /// Returns the JSON:API type of this object.
    fn resource_type(&self) -> &'static str {
        Self::RESOURCE_TYPE
    }
}

/// A resource mounted directly at the API root.
pub trait RootResource: Resource {}

/// A resource mounted under the detail path of a parent resource.
///
/// [`Resource::PARENT_TYPE`] must name `Parent`'s `RESOURCE_TYPE`; building a
/// nested service for a type where they disagree fails to compile.
pub trait NestedResource: Resource {
    /// The owning resource type.
    type Parent: Resource;

    /// Evaluates to `()` when `PARENT_TYPE` agrees with `Parent`.
    const PARENT_CHECK: () = assert!(
        matches!(
            Self::PARENT_TYPE,
            Some(declared) if same_type(declared, <Self::Parent as Resource>::RESOURCE_TYPE)
        ),
        "PARENT_TYPE must be the RESOURCE_TYPE of NestedResource::Parent"
    );
}

const fn same_type(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Fails fast when an object lacks the identity needed to address it.
pub(crate) fn require_identity<R: Resource>(resource: &R) -> Result<(), ResourceError> {
    if resource.resource_type().is_empty() {
        return Err(ResourceError::Validation {
            message: format!("{} has an empty resource type", R::NAME),
        });
    }
    if resource.id().is_empty() {
        return Err(ResourceError::Validation {
            message: format!("{} has an empty {}", R::NAME, R::ID_ATTRIBUTE),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct Volume {
        label: String,
    }

    impl Resource for Volume {
        const RESOURCE_TYPE: &'static str = "volumes";
        const NAME: &'static str = "Volume";
        const ID_ATTRIBUTE: &'static str = "label";

        fn id(&self) -> &str {
            &self.label
        }
    }

    #[test]
    fn test_resource_type_defaults_to_constant() {
        let volume = Volume::default();
        assert_eq!(volume.resource_type(), "volumes");
        assert_eq!(Volume::PARENT_TYPE, None);
    }

    #[test]
    fn test_require_identity_rejects_empty_id() {
        let error = require_identity(&Volume::default()).unwrap_err();
        assert!(matches!(
            error,
            ResourceError::Validation { message } if message == "Volume has an empty label"
        ));
    }

    #[test]
    fn test_same_type_compares_whole_names() {
        assert!(same_type("volumes", "volumes"));
        assert!(!same_type("volumes", "volume"));
        assert!(!same_type("volumes", "valumes"));
        assert!(!same_type("", "volumes"));
    }

    #[test]
    fn test_require_identity_accepts_named_object() {
        let volume = Volume {
            label: "data".to_string(),
        };
        assert!(require_identity(&volume).is_ok());
    }
}
