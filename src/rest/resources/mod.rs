//! The Kel resource types.
//!
//! ```text
//! resource-groups/{name}
//!   sites/{name}
//!     instances/{label}
//!       services/{name}
//! ```
//!
//! [`ResourceGroup`] is mounted at the API root; every other type is
//! reached through its parent's service:
//!
//! ```rust,ignore
//! use kel_api::resources::{Instance, ResourceGroup, Service, Site};
//!
//! let group = ResourceGroup::new("acme");
//! let site = Site::new("www");
//! let instance = Instance::new("default");
//!
//! let sites = client.resource_groups().sites(&group);
//! let services = sites.instances(&site).services(&instance);
//!
//! services.delete(&Service::new("web")).send().await?;
//! ```

mod instance;
mod resource_group;
mod service;
mod site;

pub use instance::Instance;
pub use resource_group::ResourceGroup;
pub use service::Service;
pub use site::Site;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{NestedResource, Resource};

    #[test]
    fn test_declared_parents_match_nesting() {
        let () = Site::PARENT_CHECK;
        let () = Instance::PARENT_CHECK;
        let () = Service::PARENT_CHECK;

        assert_eq!(Site::PARENT_TYPE, Some(ResourceGroup::RESOURCE_TYPE));
        assert_eq!(Instance::PARENT_TYPE, Some(Site::RESOURCE_TYPE));
        assert_eq!(Service::PARENT_TYPE, Some(Instance::RESOURCE_TYPE));
    }
}
