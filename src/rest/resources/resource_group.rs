//! Resource group resource implementation.
//!
//! A resource group is the top of the Kel hierarchy: it owns sites, which
//! own instances, which own services. A personal group is created for each
//! user by the server.
//!
//! # Example
//!
//! ```rust,ignore
//! use kel_api::resources::ResourceGroup;
//!
//! let groups = client.resource_groups();
//!
//! let mut group = ResourceGroup::new("acme");
//! groups.create(&mut group).send().await?;
//! println!("created at {:?}", group.created);
//!
//! let mut all = Vec::new();
//! groups.list(&mut all).send().await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::resources::Site;
use crate::rest::{Resource, ResourceService, RootResource};

/// A Kel resource group.
///
/// # Fields
///
/// - `name` - The identifier, unique across the API
/// - `personal` - Whether this is a user's personal group
/// - `created` - Creation time, set by the server
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceGroup {
    /// The group's name, used as its identifier.
    pub name: String,

    /// Whether this is a user's personal group.
    pub personal: bool,

    /// When the group was created.
    /// Read-only field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl ResourceGroup {
    /// Creates an unsaved group with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Resource for ResourceGroup {
    const RESOURCE_TYPE: &'static str = "resource-groups";
    const NAME: &'static str = "ResourceGroup";
    const ID_ATTRIBUTE: &'static str = "name";

    fn id(&self) -> &str {
        &self.name
    }
}

impl RootResource for ResourceGroup {}

impl<'c> ResourceService<'c, ResourceGroup> {
    /// Returns the service for the sites of `group`.
    #[must_use]
    pub fn sites(&self, group: &ResourceGroup) -> ResourceService<'c, Site> {
        self.nested(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::{Document, DocumentMode};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_resource_group_encodes_without_name_attribute() {
        let group = ResourceGroup::new("acme");
        let bytes = Document::encode(&group).unwrap().to_vec().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            value,
            json!({
                "data": {
                    "type": "resource-groups",
                    "id": "acme",
                    "attributes": {"personal": false}
                }
            })
        );
    }

    #[test]
    fn test_resource_group_decodes_created_timestamp() {
        let body = br#"{"data": {
            "type": "resource-groups",
            "id": "acme",
            "attributes": {"personal": true, "created": "2016-03-01T12:30:00Z"}
        }}"#;
        let document = Document::decode(body, DocumentMode::Single).unwrap();

        let mut group = ResourceGroup::default();
        document.unmarshal_one(&mut group).unwrap();

        assert_eq!(group.name, "acme");
        assert!(group.personal);
        assert_eq!(
            group.created,
            Some(Utc.with_ymd_and_hms(2016, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_resource_group_is_top_level() {
        assert_eq!(ResourceGroup::PARENT_TYPE, None);
        assert_eq!(ResourceGroup::new("acme").id(), "acme");
    }
}
