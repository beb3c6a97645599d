//! The request engine.
//!
//! A [`Request`] is a pending operation returned by a
//! [`ResourceService`](crate::rest::ResourceService). It holds the resolved
//! path, the encoded payload (for Create and Update) and the handler that
//! writes the response back onto the caller's object. Nothing touches the
//! network until [`Request::send`] is awaited, which performs exactly one
//! round trip:
//!
//! 1. Build the HTTP request and attach the encoded payload
//! 2. Attach `Content-Type`, `Accept` and any per-request headers
//! 3. Send it through the [`HttpClient`]
//! 4. Return early for a Delete answered with 204
//! 5. Decode the body in the verb's [`DocumentMode`](crate::jsonapi::DocumentMode)
//! 6. Dispatch on the status code and run the handler on success

use std::collections::HashMap;

use crate::clients::{HttpClient, HttpError, HttpRequest};
use crate::jsonapi::{Document, CONTENT_TYPE};
use crate::rest::{BoxError, Outcome, ResourceError, ResourcePath, Verb};

/// Writes a successful response document onto the caller's object.
pub(crate) type Handler<'a> = Box<dyn FnOnce(&Document) -> Result<(), BoxError> + Send + 'a>;

/// Per-request headers and JSON:API `include` relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: HashMap<String, String>,
    include: Vec<String>,
}

impl RequestOptions {
    /// Returns the extra headers, keyed by lowercase name. They override the
    /// client defaults.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the requested relationships, in the order they were added.
    #[must_use]
    pub fn include(&self) -> &[String] {
        &self.include
    }
}

/// Everything resolved before the request is sent.
#[derive(Debug)]
pub(crate) struct Prepared {
    pub(crate) path: ResourcePath,
    pub(crate) id: String,
    pub(crate) payload: Option<Document>,
}

/// A pending operation against the Kel API.
///
/// Problems found while preparing the request (an object without identity,
/// a payload that cannot be encoded, a nesting mismatch) are held until
/// [`send`](Self::send) and returned from it without any network traffic.
///
/// # Example
///
/// ```rust,ignore
/// use kel_api::resources::ResourceGroup;
///
/// let mut group = ResourceGroup::default();
/// client
///     .resource_groups()
///     .get("acme", &mut group)
///     .with_token("other-token")
///     .include("sites")
///     .send()
///     .await?;
/// ```
#[must_use = "a request does nothing until `send().await` is called"]
pub struct Request<'a> {
    client: &'a HttpClient,
    verb: Verb,
    resource: &'static str,
    prepared: Result<Prepared, ResourceError>,
    options: RequestOptions,
    handler: Option<Handler<'a>>,
}

impl std::fmt::Debug for Request<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("verb", &self.verb)
            .field("resource", &self.resource)
            .field("prepared", &self.prepared)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> Request<'a> {
    pub(crate) fn new(
        client: &'a HttpClient,
        verb: Verb,
        resource: &'static str,
        prepared: Result<Prepared, ResourceError>,
    ) -> Self {
        Self {
            client,
            verb,
            resource,
            prepared,
            options: RequestOptions::default(),
            handler: None,
        }
    }

    pub(crate) fn on_success(
        mut self,
        handler: impl FnOnce(&Document) -> Result<(), BoxError> + Send + 'a,
    ) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Returns the operation this request performs.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// Returns the resolved path, or `None` if preparation failed.
    #[must_use]
    pub fn path(&self) -> Option<&ResourcePath> {
        self.prepared.as_ref().ok().map(|prepared| &prepared.path)
    }

    /// Returns the per-request options.
    #[must_use]
    pub const fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Sends `token` in the configured token header for this request only.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        let name = self.client.token_header().as_ref().to_string();
        self.header(name, token)
    }

    /// Adds a header, replacing any default or earlier value of the same name.
    ///
    /// Names compare case-insensitively and are stored in lowercase.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Asks the server to embed a related resource in `included`.
    pub fn include(mut self, relationship: impl Into<String>) -> Self {
        self.options.include.push(relationship.into());
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] / [`ResourceError::PathResolutionFailed`]
    ///   if the request could not be prepared (nothing is sent)
    /// - [`ResourceError::Serialization`] if the payload cannot be written
    /// - [`ResourceError::Transport`] if the round trip fails
    /// - [`ResourceError::Parse`] if the response body is malformed
    /// - [`ResourceError::Validation`], [`ResourceError::NotFound`] or
    ///   [`ResourceError::UnexpectedStatus`] depending on the status code
    /// - [`ResourceError::Handler`] if writing the result back fails
    pub async fn send(self) -> Result<(), ResourceError> {
        let Self {
            client,
            verb,
            resource,
            prepared,
            options,
            handler,
        } = self;
        let Prepared { path, id, payload } = prepared?;
        debug_assert_eq!(
            verb.has_payload(),
            payload.is_some(),
            "{verb} payload does not match the verb"
        );

        let mut builder = HttpRequest::builder(verb.http_method(), path.as_string())
            .content_type(CONTENT_TYPE)
            .header("Accept", CONTENT_TYPE);
        if let Some(document) = payload {
            builder = builder.body(document.to_vec().map_err(ResourceError::Serialization)?);
        }
        for (name, value) in options.headers {
            builder = builder.header(name, value);
        }
        if !options.include.is_empty() {
            builder = builder.query_param("include", options.include.join(","));
        }
        let request = builder.build().map_err(HttpError::from)?;

        let response = client.request(request).await?;

        if verb.skips_body(response.code) {
            tracing::debug!("{verb} {resource} {path}: no content");
            return Ok(());
        }

        if let Some(content_type) = response.content_type() {
            if !content_type.starts_with(CONTENT_TYPE) {
                tracing::debug!("{verb} {resource} {path}: unexpected content type {content_type}");
            }
        }

        let document = Document::decode(&response.body, verb.document_mode())
            .map_err(ResourceError::Parse)?
            .with_status(response.code);

        match verb.dispatch(response.code) {
            Outcome::Success => match handler {
                Some(handler) => handler(&document).map_err(ResourceError::Handler),
                None => Ok(()),
            },
            Outcome::Validation => Err(ResourceError::Validation {
                message: document
                    .first_error_detail()
                    .map_or_else(|| response.status.clone(), ToString::to_string),
            }),
            Outcome::NotFound => Err(ResourceError::NotFound { resource, id }),
            Outcome::Unexpected => Err(ResourceError::UnexpectedStatus {
                code: response.code,
                status: response.status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiUrl, KelConfig};

    fn client() -> HttpClient {
        let config = KelConfig::builder()
            .base_url(ApiUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        HttpClient::new(&config).unwrap()
    }

    fn prepared(path: &str) -> Prepared {
        Prepared {
            path: ResourcePath::root().join(path),
            id: String::new(),
            payload: None,
        }
    }

    #[test]
    fn test_options_accumulate() {
        let client = client();
        let request = Request::new(&client, Verb::List, "Site", Ok(prepared("sites")))
            .header("X-Trace", "1")
            .include("instances")
            .include("services")
            .with_token("secret");

        assert_eq!(request.verb(), Verb::List);
        assert_eq!(request.path().map(ToString::to_string).as_deref(), Some("/sites"));
        assert_eq!(request.options().include(), ["instances", "services"]);
        assert_eq!(
            request.options().headers().get("x-kel-token"),
            Some(&"secret".to_string())
        );
        assert_eq!(
            request.options().headers().get("x-trace"),
            Some(&"1".to_string())
        );
    }

    #[test]
    fn test_header_names_collapse_across_case() {
        let client = client();
        let request = Request::new(&client, Verb::List, "Site", Ok(prepared("sites")))
            .with_token("first")
            .header("x-KEL-token", "second");

        assert_eq!(request.options().headers().len(), 1);
        assert_eq!(
            request.options().headers().get("x-kel-token"),
            Some(&"second".to_string())
        );
    }

    #[tokio::test]
    async fn test_preparation_error_is_returned_without_sending() {
        let client = client();
        let request = Request::new(
            &client,
            Verb::Get,
            "Site",
            Err(ResourceError::Validation {
                message: "Site has an empty name".to_string(),
            }),
        );
        assert!(request.path().is_none());

        let error = request.send().await.unwrap_err();
        assert!(matches!(
            error,
            ResourceError::Validation { message } if message == "Site has an empty name"
        ));
    }
}
