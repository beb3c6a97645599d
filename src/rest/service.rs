//! The per-resource-type facade over the request engine.

use std::marker::PhantomData;

use crate::clients::HttpClient;
use crate::jsonapi::Document;
use crate::rest::request::Prepared;
use crate::rest::resource::require_identity;
use crate::rest::{
    collection_path, detail_path, NestedResource, Request, Resource, ResourceError, ResourcePath,
    RootResource, Verb,
};

/// Operations on one collection of `R`.
///
/// A service is bound to the collection it addresses: a top-level
/// collection from [`KelClient::service`](crate::KelClient::service), or a
/// collection nested under one parent object via [`nested`](Self::nested).
/// Objects never hold a reference back to their service; pass the service
/// (or the client) to where it is needed.
///
/// `create`, `list`, `get`, `update` and `delete` return a pending
/// [`Request`]; `reload` and `save` execute immediately.
///
/// # Example
///
/// ```rust,ignore
/// use kel_api::resources::{ResourceGroup, Site};
///
/// let groups = client.resource_groups();
///
/// let mut group = ResourceGroup::new("acme");
/// groups.create(&mut group).send().await?;
///
/// let mut sites: Vec<Site> = Vec::new();
/// groups.sites(&group).list(&mut sites).send().await?;
/// ```
pub struct ResourceService<'c, R> {
    client: &'c HttpClient,
    parent: Result<Option<ResourcePath>, UnresolvedParent>,
    _resource: PhantomData<fn() -> R>,
}

/// Why the parent of a nested service has no detail path.
#[derive(Debug, Clone)]
enum UnresolvedParent {
    Validation(String),
    Path {
        resource: &'static str,
        reason: String,
    },
}

impl UnresolvedParent {
    fn new(error: ResourceError) -> Self {
        match error {
            ResourceError::PathResolutionFailed { resource, reason } => {
                Self::Path { resource, reason }
            }
            ResourceError::Validation { message } => Self::Validation(message),
            other => Self::Validation(other.to_string()),
        }
    }

    fn to_error(&self) -> ResourceError {
        match self {
            Self::Validation(message) => ResourceError::Validation {
                message: message.clone(),
            },
            Self::Path { resource, reason } => ResourceError::PathResolutionFailed {
                resource: *resource,
                reason: reason.clone(),
            },
        }
    }
}

impl<R> Clone for ResourceService<'_, R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            parent: self.parent.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for ResourceService<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService")
            .field("resource", &R::NAME)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

impl<'c, R: Resource> ResourceService<'c, R> {
    /// Creates a service for `R`, mounted under `parent` when given.
    ///
    /// A mismatch between `parent` and [`Resource::PARENT_TYPE`] is reported
    /// by each operation as [`ResourceError::PathResolutionFailed`].
    #[must_use]
    pub const fn new(client: &'c HttpClient, parent: Option<ResourcePath>) -> Self {
        Self {
            client,
            parent: Ok(parent),
            _resource: PhantomData,
        }
    }

    /// Returns the parent detail path this service is mounted under.
    ///
    /// `None` for a top-level service, and for a nested service whose parent
    /// could not be addressed.
    #[must_use]
    pub fn parent(&self) -> Option<&ResourcePath> {
        self.parent.as_ref().ok().and_then(Option::as_ref)
    }

    /// Returns the collection path of this service.
    ///
    /// # Errors
    ///
    /// See [`collection_path`]. A nested service whose parent could not be
    /// addressed returns the parent's error instead.
    pub fn collection_path(&self) -> Result<ResourcePath, ResourceError> {
        collection_path::<R>(self.parent_path()?)
    }

    /// Returns the detail path of the object identified by `id`.
    ///
    /// # Errors
    ///
    /// See [`detail_path`] and [`collection_path`](Self::collection_path).
    pub fn detail_path(&self, id: &str) -> Result<ResourcePath, ResourceError> {
        detail_path::<R>(self.parent_path()?, id)
    }

    /// Creates `resource` (POST to the collection, expects 201).
    ///
    /// On success the server's representation is written back onto it.
    pub fn create<'a>(&self, resource: &'a mut R) -> Request<'a>
    where
        'c: 'a,
    {
        let prepared = Self::prepare_payload(resource, self.collection_path());
        Request::new(self.client, Verb::Create, R::NAME, prepared)
            .on_success(move |document| Ok(document.unmarshal_one(resource)?))
    }

    /// Lists the collection (GET, expects 200).
    ///
    /// On success every element of the response is appended to `out`, in
    /// server order.
    pub fn list<'a>(&self, out: &'a mut Vec<R>) -> Request<'a>
    where
        'c: 'a,
    {
        let prepared = self.collection_path().map(|path| Prepared {
            path,
            id: String::new(),
            payload: None,
        });
        Request::new(self.client, Verb::List, R::NAME, prepared)
            .on_success(move |document| Ok(document.unmarshal_all(out)?))
    }

    /// Fetches the object identified by `id` into `target` (GET, expects 200).
    ///
    /// `target` is only written on success.
    pub fn get<'a>(&self, id: &str, target: &'a mut R) -> Request<'a>
    where
        'c: 'a,
    {
        let prepared = self.detail_path(id).map(|path| Prepared {
            path,
            id: id.to_string(),
            payload: None,
        });
        Request::new(self.client, Verb::Get, R::NAME, prepared)
            .on_success(move |document| Ok(document.unmarshal_one(target)?))
    }

    /// Updates `resource` at its detail path (PATCH, expects 200).
    ///
    /// On success the server's representation is written back onto it.
    pub fn update<'a>(&self, resource: &'a mut R) -> Request<'a>
    where
        'c: 'a,
    {
        let path = self.detail_path(resource.id());
        let prepared = Self::prepare_payload(resource, path);
        Request::new(self.client, Verb::Update, R::NAME, prepared)
            .on_success(move |document| Ok(document.unmarshal_one(resource)?))
    }

    /// Deletes `resource` (DELETE, expects 200, 202 or 204).
    pub fn delete(&self, resource: &R) -> Request<'c> {
        let prepared = require_identity(resource).and_then(|()| self.prepare_bare(resource.id()));
        Request::new(self.client, Verb::Delete, R::NAME, prepared)
    }

    /// Deletes the object identified by `id`.
    pub fn delete_by_id(&self, id: &str) -> Request<'c> {
        Request::new(self.client, Verb::Delete, R::NAME, self.prepare_bare(id))
    }

    /// Re-fetches `resource` by its own identifier and replaces it in place.
    ///
    /// Attributes are read into a fresh default instance, so values the
    /// server no longer reports are reset. On failure `resource` is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Any error from [`Request::send`] for a Get.
    pub async fn reload(&self, resource: &mut R) -> Result<(), ResourceError> {
        require_identity(resource)?;
        let mut reloaded = R::default();
        self.get(resource.id(), &mut reloaded).send().await?;
        *resource = reloaded;
        Ok(())
    }

    /// Persists `resource` at its own detail path.
    ///
    /// # Errors
    ///
    /// Any error from [`Request::send`] for an Update.
    pub async fn save(&self, resource: &mut R) -> Result<(), ResourceError> {
        self.update(resource).send().await
    }

    /// Returns the service for the children of `parent`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use kel_api::resources::{ResourceGroup, Site};
    ///
    /// let group = ResourceGroup::new("acme");
    /// let sites = client.resource_groups().nested::<Site>(&group);
    /// assert_eq!(sites.collection_path()?.to_string(), "/resource-groups/acme/sites");
    /// ```
    pub fn nested<C>(&self, parent: &R) -> ResourceService<'c, C>
    where
        C: NestedResource<Parent = R>,
    {
        let () = C::PARENT_CHECK;
        let parent = self
            .detail_path(parent.id())
            .map(Some)
            .map_err(UnresolvedParent::new);
        ResourceService {
            client: self.client,
            parent,
            _resource: PhantomData,
        }
    }

    fn parent_path(&self) -> Result<Option<&ResourcePath>, ResourceError> {
        self.parent
            .as_ref()
            .map(Option::as_ref)
            .map_err(UnresolvedParent::to_error)
    }

    fn prepare_payload(
        resource: &R,
        path: Result<ResourcePath, ResourceError>,
    ) -> Result<Prepared, ResourceError> {
        require_identity(resource)?;
        let payload = Document::encode(resource).map_err(ResourceError::Serialization)?;
        Ok(Prepared {
            path: path?,
            id: resource.id().to_string(),
            payload: Some(payload),
        })
    }

    fn prepare_bare(&self, id: &str) -> Result<Prepared, ResourceError> {
        Ok(Prepared {
            path: self.detail_path(id)?,
            id: id.to_string(),
            payload: None,
        })
    }
}

impl<'c, R: RootResource> ResourceService<'c, R> {
    /// Creates a service for a top-level collection.
    #[must_use]
    pub const fn root(client: &'c HttpClient) -> Self {
        Self::new(client, None)
    }
}
