//! # ActorClient Trait
//!
//! Provides a common interface for record-specific clients, adding default `get`,
//! `list` and `delete` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient, Versioned};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard read/delete operations.
///
/// # Example
///
/// ```rust
/// use keyed_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Shelf { label: String }
/// #[derive(Debug)] struct ShelfCreate;
/// #[derive(Debug)] struct ShelfUpdate;
/// #[derive(Debug)] enum ShelfAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct ShelfError(String);
/// impl From<String> for ShelfError { fn from(s: String) -> Self { ShelfError(s) } }
///
/// #[async_trait]
/// impl ActorEntity for Shelf {
///     type Id = u32; type Create = ShelfCreate; type Update = ShelfUpdate;
///     type Action = ShelfAction; type ActionResult = (); type Context = (); type Error = ShelfError;
///     fn from_create_params(id: &u32, _: ShelfCreate) -> Result<Self, ShelfError> {
///         Ok(Self { label: id.to_string() })
///     }
///     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), ShelfError> { Ok(()) }
///     async fn handle_action(&mut self, a: ShelfAction, _: &()) -> Result<(), ShelfError> { match a {} }
/// }
///
/// struct ShelfClient { inner: ResourceClient<Shelf> }
///
/// #[async_trait]
/// impl ActorClient<Shelf> for ShelfClient {
///     type Error = ShelfError;
///     fn inner(&self) -> &ResourceClient<Shelf> { &self.inner }
///     fn map_error(e: FrameworkError) -> ShelfError { ShelfError(e.to_string()) }
/// }
///
/// async fn usage(client: ShelfClient) {
///     // get(), list() and delete() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific record error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record, ordered by key.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<(T::Id, Versioned<T>)>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by key, unconditionally.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id, None).await.map_err(Self::map_error)
    }
}
