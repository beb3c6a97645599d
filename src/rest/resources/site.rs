//! Site resource implementation.
//!
//! Sites live under a resource group:
//! `/resource-groups/{group}/sites/{name}`.

use serde::{Deserialize, Serialize};

use crate::rest::resources::{Instance, ResourceGroup};
use crate::rest::{NestedResource, Resource, ResourceService};

/// A Kel site.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Site {
    /// The site's name, unique within its resource group.
    pub name: String,
}

impl Site {
    /// Creates an unsaved site with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Resource for Site {
    const RESOURCE_TYPE: &'static str = "sites";
    const NAME: &'static str = "Site";
    const ID_ATTRIBUTE: &'static str = "name";
    const PARENT_TYPE: Option<&'static str> = Some(ResourceGroup::RESOURCE_TYPE);

    fn id(&self) -> &str {
        &self.name
    }
}

impl NestedResource for Site {
    type Parent = ResourceGroup;
}

impl<'c> ResourceService<'c, Site> {
    /// Returns the service for the instances of `site`.
    #[must_use]
    pub fn instances(&self, site: &Site) -> ResourceService<'c, Instance> {
        self.nested(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{collection_path, detail_path};

    #[test]
    fn test_site_paths_are_nested_under_group() {
        let group = detail_path::<ResourceGroup>(None, "acme").unwrap();

        let collection = collection_path::<Site>(Some(&group)).unwrap();
        assert_eq!(collection.to_string(), "/resource-groups/acme/sites");

        let detail = detail_path::<Site>(Some(&group), "www").unwrap();
        assert_eq!(detail.to_string(), "/resource-groups/acme/sites/www");
    }

    #[test]
    fn test_site_requires_group() {
        assert!(collection_path::<Site>(None).is_err());
    }
}
