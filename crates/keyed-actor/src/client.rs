//! # Generic Client
//!
//! This module defines the generic client for communicating with a `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Change, ResourceRequest, Selector, Versioned};
use tokio::sync::{broadcast, mpsc, oneshot};

/// A type-safe, cloneable handle to a `ResourceActor`.
///
/// Requests travel over a Tokio mpsc channel and results come back on oneshot
/// channels. The client also holds the sending half of the change feed so any clone
/// can open a new subscription without a round trip to the actor.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    feed: broadcast::Sender<Change<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            feed: self.feed.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, feed: broadcast::Sender<Change<T>>) -> Self {
        Self { sender, feed }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, id: T::Id, params: T::Create) -> Result<Versioned<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create {
            id,
            params,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<(T::Id, Versioned<T>)>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(
        &self,
        id: T::Id,
        expected: Option<u64>,
        update: T::Update,
    ) -> Result<Versioned<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            expected,
            update,
            respond_to,
        })
        .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        expected: Option<u64>,
        action: T::Action,
    ) -> Result<Versioned<T::ActionResult>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            expected,
            action,
            respond_to,
        })
        .await
    }

    pub async fn rekey(
        &self,
        from: T::Id,
        to: T::Id,
        expected: Option<u64>,
    ) -> Result<Versioned<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Rekey {
            from,
            to,
            expected,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id, expected: Option<u64>) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete {
            id,
            expected,
            respond_to,
        })
        .await
    }

    pub async fn purge(&self, selector: Selector<T>) -> Result<Vec<T::Id>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Purge {
            selector,
            respond_to,
        })
        .await
    }

    /// Opens a new subscription to the change feed.
    ///
    /// Only writes committed after this call are delivered; pair it with
    /// [`list`](Self::list) (see [`LiveView`](crate::LiveView)) for a full picture.
    pub fn subscribe(&self) -> broadcast::Receiver<Change<T>> {
        self.feed.subscribe()
    }
}
