//! Service resource implementation.

use serde::{Deserialize, Serialize};

use crate::rest::resources::Instance;
use crate::rest::{NestedResource, Resource};

/// A Kel service running inside an instance.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Service {
    /// The service name, unique within its instance.
    pub name: String,
}

impl Service {
    /// Creates an unsaved service with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Resource for Service {
    const RESOURCE_TYPE: &'static str = "services";
    const NAME: &'static str = "Service";
    const ID_ATTRIBUTE: &'static str = "name";
    const PARENT_TYPE: Option<&'static str> = Some(Instance::RESOURCE_TYPE);

    fn id(&self) -> &str {
        &self.name
    }
}

impl NestedResource for Service {
    type Parent = Instance;
}
