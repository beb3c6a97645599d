//! Resource infrastructure for the Kel API.
//!
//! This module provides the generic engine every resource type shares:
//!
//! - **[`Resource`] trait**: what a type declares to travel through the engine
//! - **[`ResourceService<R>`]**: create, list, get, update, delete, reload and
//!   save for one collection of `R`
//! - **[`Request`]**: a pending operation, executed with `send().await`
//! - **[`Verb`] and [`Outcome`]**: the per-verb status code contract
//! - **Path building**: [`ResourcePath`], [`collection_path`], [`detail_path`]
//! - **[`ResourceError`]**: the error taxonomy of every operation
//!
//! The concrete Kel types live in [`resources`].
//!
//! # Example
//!
//! ```rust,ignore
//! use kel_api::{ApiUrl, AuthToken, KelClient, KelConfig};
//! use kel_api::resources::{ResourceGroup, Site};
//! use kel_api::rest::ResourceError;
//!
//! let config = KelConfig::builder()
//!     .base_url(ApiUrl::new("https://kel.example.com")?)
//!     .token(AuthToken::new("token")?)
//!     .build()?;
//! let client = KelClient::new(&config)?;
//! let groups = client.resource_groups();
//!
//! // Create
//! let mut group = ResourceGroup::new("acme");
//! groups.create(&mut group).send().await?;
//!
//! // Get, with a one-off token
//! let mut fetched = ResourceGroup::default();
//! match groups.get("ghost", &mut fetched).with_token("other").send().await {
//!     Err(ResourceError::NotFound { .. }) => println!("no such group"),
//!     other => other?,
//! }
//!
//! // Nested collections
//! let sites = groups.sites(&group);
//! let mut site = Site::new("www");
//! sites.create(&mut site).send().await?;
//! sites.delete(&site).send().await?;
//! ```

mod dispatch;
mod errors;
mod path;
mod request;
mod resource;
mod service;

pub mod resources;

// Public exports
pub use dispatch::{Outcome, Verb};
pub use errors::{BoxError, ResourceError};
pub use path::{collection_path, detail_path, ResourcePath};
pub use request::{Request, RequestOptions};
pub use resource::{NestedResource, Resource, RootResource};
pub use service::ResourceService;
