//! HTTP client for Kel API communication.
//!
//! This module provides the [`HttpClient`] type, the transport the request
//! engine sends through. It performs exactly one round trip per call and
//! returns the response whatever its status code.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiUrl, HeaderName, KelConfig};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Kel API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and the API token
/// - Header merging, with per-request headers taking precedence
///
/// Connection pooling and TLS are delegated to the inner `reqwest::Client`.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, so many requests can be in flight at once.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: ApiUrl,
    token_header: HeaderName,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use kel_api::{KelConfig, ApiUrl, AuthToken};
    /// use kel_api::clients::HttpClient;
    ///
    /// let config = KelConfig::builder()
    ///     .base_url(ApiUrl::new("https://kel.example.com").unwrap())
    ///     .token(AuthToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert_eq!(client.default_headers().get("X-Kel-Token"), Some(&"token".to_string()));
    /// ```
    pub fn new(config: &KelConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Kel API Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        if let Some(token) = config.token() {
            default_headers.insert(
                config.token_header().as_ref().to_string(),
                token.as_ref().to_string(),
            );
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            token_header: config.token_header().clone(),
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Returns the name of the header that carries the API token.
    #[must_use]
    pub const fn token_header(&self) -> &HeaderName {
        &self.token_header
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Kel API.
    ///
    /// Any status code is returned as `Ok`; interpreting it is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A header cannot be encoded (`InvalidHeader`)
    /// - The request cannot be sent or the body cannot be read (`Network`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        // Names are case-insensitive; later layers replace earlier ones.
        let mut headers = reqwest::header::HeaderMap::new();
        for (key, value) in &self.default_headers {
            Self::insert_header(&mut headers, key, value)?;
        }
        if let Some(content_type) = &request.content_type {
            Self::insert_header(&mut headers, "Content-Type", content_type)?;
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                Self::insert_header(&mut headers, key, value)?;
            }
        }

        let method = match request.http_method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut req_builder = self.client.request(method, &url).headers(headers);

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        tracing::debug!("{} {}", request.http_method, request.path);

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        tracing::debug!(
            "{} {} -> {} ({} bytes)",
            request.http_method,
            request.path,
            code,
            body.len()
        );

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Inserts a header, replacing any value already held under the same
    /// name regardless of case.
    fn insert_header(
        headers: &mut reqwest::header::HeaderMap,
        key: &str,
        value: &str,
    ) -> Result<(), HttpError> {
        let invalid = || HttpError::InvalidHeader {
            name: key.to_string(),
        };
        let name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|_| invalid())?;
        let value = reqwest::header::HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(name, value);
        Ok(())
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthToken;

    fn create_test_config() -> KelConfig {
        KelConfig::builder()
            .base_url(ApiUrl::new("https://kel.example.com/v1").unwrap())
            .token(AuthToken::new("test-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_with_config() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(client.base_url().as_ref(), "https://kel.example.com/v1");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Kel API Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = KelConfig::builder()
            .base_url(ApiUrl::new("https://kel.example.com").unwrap())
            .user_agent_prefix("kelctl/0.3")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("kelctl/0.3 | "));
    }

    #[test]
    fn test_token_header_injection() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        assert_eq!(
            client.default_headers().get("X-Kel-Token"),
            Some(&"test-token".to_string())
        );
    }

    #[test]
    fn test_custom_token_header_name() {
        let config = KelConfig::builder()
            .base_url(ApiUrl::new("https://kel.example.com").unwrap())
            .token(AuthToken::new("abc").unwrap())
            .token_header(HeaderName::new("Authorization").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(client.token_header().as_ref(), "Authorization");
        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"abc".to_string())
        );
        assert!(client.default_headers().get("X-Kel-Token").is_none());
    }

    #[test]
    fn test_insert_header_replaces_regardless_of_case() {
        let mut headers = reqwest::header::HeaderMap::new();
        HttpClient::insert_header(&mut headers, "X-Kel-Token", "configured").unwrap();
        HttpClient::insert_header(&mut headers, "x-kel-token", "override").unwrap();
        HttpClient::insert_header(&mut headers, "Content-Type", "application/vnd.api+json")
            .unwrap();
        HttpClient::insert_header(&mut headers, "content-type", "text/plain").unwrap();

        let values = |name: &str| -> Vec<String> {
            headers
                .get_all(name)
                .iter()
                .map(|value| value.to_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(values("x-kel-token"), ["override"]);
        assert_eq!(values("content-type"), ["text/plain"]);
    }

    #[test]
    fn test_insert_header_rejects_invalid_name() {
        let mut headers = reqwest::header::HeaderMap::new();
        let result = HttpClient::insert_header(&mut headers, "bad header", "value");
        assert!(matches!(result, Err(HttpError::InvalidHeader { name }) if name == "bad header"));
    }

    #[test]
    fn test_no_token_header_without_token() {
        let config = KelConfig::builder()
            .base_url(ApiUrl::new("https://kel.example.com").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert!(client.default_headers().get("X-Kel-Token").is_none());
    }
}
