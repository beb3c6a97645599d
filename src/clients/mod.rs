//! HTTP client types for Kel API communication.
//!
//! This module provides the transport layer and the client entry point.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`KelClient`]: The entry point that hands out resource services
//! - [`HttpClient`]: The async HTTP transport
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response with status, headers and body bytes
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//!
//! # Example
//!
//! ```rust,ignore
//! use kel_api::{ApiUrl, KelConfig};
//! use kel_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let config = KelConfig::builder()
//!     .base_url(ApiUrl::new("https://kel.example.com")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/resource-groups").build()?;
//! let response = client.request(request).await?;
//! println!("{}", response.status);
//! ```
//!
//! # Retry Behavior
//!
//! There is none. Each call is exactly one round trip, and any status code
//! is returned to the caller as an [`HttpResponse`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod kel_client;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use kel_client::KelClient;
