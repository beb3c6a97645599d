//! The Kel API client.
//!
//! This module provides [`KelClient`], the entry point that owns the
//! transport and hands out resource services.

use crate::clients::{HttpClient, HttpError};
use crate::config::KelConfig;
use crate::rest::resources::ResourceGroup;
use crate::rest::{ResourceService, RootResource};

/// Client for the Kel API.
///
/// Services borrow the client, so a single client can drive any number of
/// services and concurrent requests.
///
/// # Thread Safety
///
/// `KelClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use kel_api::{ApiUrl, AuthToken, KelClient, KelConfig};
///
/// let config = KelConfig::builder()
///     .base_url(ApiUrl::new("https://kel.example.com").unwrap())
///     .token(AuthToken::new("token").unwrap())
///     .build()
///     .unwrap();
/// let client = KelClient::new(&config).unwrap();
///
/// let groups = client.resource_groups();
/// assert_eq!(groups.collection_path().unwrap().to_string(), "/resource-groups");
/// ```
#[derive(Debug)]
pub struct KelClient {
    http_client: HttpClient,
    config: KelConfig,
}

// Verify KelClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KelClient>();
};

impl KelClient {
    /// Creates a new client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: &KelConfig) -> Result<Self, HttpError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!("Kel client ready for {}", config.base_url());

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Returns the transport shared by every service of this client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &KelConfig {
        &self.config
    }

    /// Returns the service for a top-level collection.
    #[must_use]
    pub const fn service<R: RootResource>(&self) -> ResourceService<'_, R> {
        ResourceService::root(&self.http_client)
    }

    /// Returns the service for resource groups.
    #[must_use]
    pub const fn resource_groups(&self) -> ResourceService<'_, ResourceGroup> {
        self.service()
    }
}
