//! # Kel API Rust Client
//!
//! A Rust client for the Kel API, a JSON:API backend that manages a
//! hierarchy of resources: resource groups own sites, sites own instances,
//! and instances own services.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`KelConfig`] and [`KelConfigBuilder`]
//! - Validated newtypes for the base URL, API token and token header
//! - A JSON:API document codec in [`jsonapi`]
//! - One generic request engine in [`rest`] shared by every resource type
//! - The Kel resource types in [`resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use kel_api::{ApiUrl, AuthToken, KelClient, KelConfig};
//!
//! let config = KelConfig::builder()
//!     .base_url(ApiUrl::new("https://kel.example.com").unwrap())
//!     .token(AuthToken::new("your-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = KelClient::new(&config).unwrap();
//! let groups = client.resource_groups();
//! ```
//!
//! ## Working With Resources
//!
//! Every operation returns a pending request that performs exactly one
//! round trip when awaited:
//!
//! ```rust,ignore
//! use kel_api::resources::{ResourceGroup, Site};
//! use kel_api::rest::ResourceError;
//!
//! let groups = client.resource_groups();
//!
//! let mut group = ResourceGroup::new("acme");
//! groups.create(&mut group).send().await?;
//!
//! let mut site = Site::new("www");
//! groups.sites(&group).create(&mut site).send().await?;
//!
//! let mut missing = ResourceGroup::default();
//! if let Err(ResourceError::NotFound { .. }) = groups.get("ghost", &mut missing).send().await {
//!     println!("ghost does not exist");
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction, and objects
//!   without identity are rejected before anything is sent
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod jsonapi;
pub mod rest;

pub use rest::resources;

// Re-export public types at crate root for convenience
pub use config::{ApiUrl, AuthToken, HeaderName, KelConfig, KelConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, KelClient,
};

// Re-export the resource engine
pub use rest::{Resource, ResourceError, ResourceService};
