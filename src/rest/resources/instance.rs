//! Instance resource implementation.

use serde::{Deserialize, Serialize};

use crate::rest::resources::{Service, Site};
use crate::rest::{NestedResource, Resource, ResourceService};

/// A Kel instance: one running deployment of a site, identified by label.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Instance {
    /// The instance label (e.g., `default`).
    pub label: String,
}

impl Instance {
    /// Creates an unsaved instance with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Resource for Instance {
    const RESOURCE_TYPE: &'static str = "instances";
    const NAME: &'static str = "Instance";
    const ID_ATTRIBUTE: &'static str = "label";
    const PARENT_TYPE: Option<&'static str> = Some(Site::RESOURCE_TYPE);

    fn id(&self) -> &str {
        &self.label
    }
}

impl NestedResource for Instance {
    type Parent = Site;
}

impl<'c> ResourceService<'c, Instance> {
    /// Returns the service for the services of `instance`.
    #[must_use]
    pub fn services(&self, instance: &Instance) -> ResourceService<'c, Service> {
        self.nested(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::{Document, DocumentMode};

    #[test]
    fn test_instance_identity_travels_as_label() {
        let bytes = Document::encode(&Instance::new("default"))
            .unwrap()
            .to_vec()
            .unwrap();
        let document = Document::decode(&bytes, DocumentMode::Single).unwrap();

        assert_eq!(document.data[0].id, "default");
        assert!(document.data[0].attributes.get("label").is_none());

        let mut instance = Instance::default();
        document.unmarshal_one(&mut instance).unwrap();
        assert_eq!(instance.label, "default");
    }
}
