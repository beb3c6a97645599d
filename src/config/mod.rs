//! Configuration types for the Kel API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`KelConfig`]: The configuration struct holding all client settings
//! - [`KelConfigBuilder`]: A builder for constructing [`KelConfig`] instances
//! - [`ApiUrl`]: A validated base URL
//! - [`AuthToken`]: A validated API token with masked debug output
//! - [`HeaderName`]: A validated header name for the token header
//!
//! # Example
//!
//! ```rust
//! use kel_api::{KelConfig, ApiUrl, AuthToken};
//!
//! let config = KelConfig::builder()
//!     .base_url(ApiUrl::new("https://kel.example.com/v1").unwrap())
//!     .token(AuthToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.token_header().as_ref(), "X-Kel-Token");
//! ```

mod newtypes;

pub use newtypes::{ApiUrl, AuthToken, HeaderName};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the Kel API client.
///
/// # Thread Safety
///
/// `KelConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct KelConfig {
    base_url: ApiUrl,
    token: Option<AuthToken>,
    token_header: HeaderName,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl KelConfig {
    /// Creates a new builder for constructing a `KelConfig`.
    #[must_use]
    pub fn builder() -> KelConfigBuilder {
        KelConfigBuilder::new()
    }

    /// Returns the base URL all resource paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Returns the API token, if configured.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Returns the header name the token is sent under.
    #[must_use]
    pub const fn token_header(&self) -> &HeaderName {
        &self.token_header
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the transport-level request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify KelConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KelConfig>();
};

/// Builder for constructing [`KelConfig`] instances.
///
/// The only required field is `base_url`.
///
/// # Defaults
///
/// - `token`: `None`
/// - `token_header`: `X-Kel-Token`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no deadline beyond reqwest's own)
#[derive(Debug, Default)]
pub struct KelConfigBuilder {
    base_url: Option<ApiUrl>,
    token: Option<AuthToken>,
    token_header: Option<HeaderName>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl KelConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: ApiUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API token sent with every request.
    #[must_use]
    pub fn token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Overrides the header name the token is sent under.
    #[must_use]
    pub fn token_header(mut self, name: HeaderName) -> Self {
        self.token_header = Some(name);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a transport-level timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`KelConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<KelConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(KelConfig {
            base_url,
            token: self.token,
            token_header: self
                .token_header
                .unwrap_or_else(HeaderName::default_token_header),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let result = KelConfigBuilder::new()
            .token(AuthToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = KelConfig::builder()
            .base_url(ApiUrl::new("https://kel.example.com").unwrap())
            .build()
            .unwrap();

        assert!(config.token().is_none());
        assert_eq!(config.token_header().as_ref(), "X-Kel-Token");
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = KelConfig::builder()
            .base_url(ApiUrl::new("https://kel.example.com/v1").unwrap())
            .token(AuthToken::new("abc").unwrap())
            .token_header(HeaderName::new("Authorization").unwrap())
            .user_agent_prefix("kelctl/0.3")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://kel.example.com/v1");
        assert_eq!(config.token().map(AsRef::as_ref), Some("abc"));
        assert_eq!(config.token_header().as_ref(), "Authorization");
        assert_eq!(config.user_agent_prefix(), Some("kelctl/0.3"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = KelConfig::builder()
            .base_url(ApiUrl::new("https://kel.example.com").unwrap())
            .token(AuthToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("KelConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
