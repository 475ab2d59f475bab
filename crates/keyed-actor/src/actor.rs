//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the single authority over one keyed
//! collection. It processes messages sequentially, so key uniqueness, version checks
//! and hook validation all happen without locks and without read-then-write races.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Change, ResourceRequest, Versioned};
use std::collections::BTreeMap;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of the change feed. Subscribers that fall further behind receive
/// `RecvError::Lagged` and are expected to resync from a fresh snapshot.
pub const FEED_CAPACITY: usize = 256;

/// The generic actor that owns a keyed, versioned collection of entities.
///
/// # Concurrency Model
/// Each actor runs in its own Tokio task and handles one message at a time. Two
/// clients racing to create the same key are serialized here: the first wins, the
/// second gets [`FrameworkError::AlreadyExists`]. Two clients racing to mutate the
/// same record with the version they last read are serialized too: the second gets
/// [`FrameworkError::VersionConflict`].
///
/// Versions come from one counter per actor and only ever increase, so a key that is
/// freed and reused never hands out a version an earlier record already had.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use keyed_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = String;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(_: &String, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { text: p.text })
///     }
///     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), NoteError> { Ok(()) }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), NoteError> { match a {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let created = client.create("a".into(), NoteCreate { text: "hi".into() }).await.unwrap();
///     assert_eq!(created.version, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: rejects an occupied key, builds the entity, runs `on_create`, inserts at the next version.
/// * **Get / List**: clones of the stored records.
/// * **Update / Action**: version check, hook on a working copy, commit at the next version.
/// * **Rekey**: version check, refuses an occupied target, runs `on_rekey`, moves the record.
/// * **Delete / Purge**: runs `on_delete`, removes the record(s).
///
/// Every committed write is published on the change feed.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, Versioned<T>>,
    feed: broadcast::Sender<Change<T>>,
    last_version: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. If it is full, client
    /// calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            feed: feed.clone(),
            last_version: 0,
        };
        let client = ResourceClient::new(sender, feed);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Create");
                    let result = self.create(id, params, &context).await;
                    log_outcome(entity_type, "Created", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<_> = self
                        .store
                        .iter()
                        .map(|(id, record)| (id.clone(), record.clone()))
                        .collect();
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    expected,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?expected, ?update, "Update");
                    let result = self.update(id, expected, update, &context).await;
                    log_outcome(entity_type, "Updated", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    expected,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?expected, ?action, "Action");
                    let result = self.action(id, expected, action, &context).await;
                    log_outcome(entity_type, "Action ok", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Rekey {
                    from,
                    to,
                    expected,
                    respond_to,
                } => {
                    debug!(entity_type, %from, %to, ?expected, "Rekey");
                    let result = self.rekey(from, to, expected, &context).await;
                    log_outcome(entity_type, "Rekeyed", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete {
                    id,
                    expected,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?expected, "Delete");
                    let result = self.delete(id, expected, &context).await;
                    log_outcome(entity_type, "Deleted", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Purge {
                    selector,
                    respond_to,
                } => {
                    let mut removed = Vec::new();
                    let matching: Vec<T::Id> = self
                        .store
                        .iter()
                        .filter(|(_, record)| selector.matches(&record.value))
                        .map(|(id, _)| id.clone())
                        .collect();
                    for id in matching {
                        match self.delete(id.clone(), None, &context).await {
                            Ok(()) => removed.push(id),
                            Err(e) => warn!(entity_type, %id, error = %e, "Purge skipped"),
                        }
                    }
                    info!(entity_type, removed = removed.len(), size = self.store.len(), "Purged");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<Versioned<T>, FrameworkError> {
        if self.store.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        let mut item = T::from_create_params(&id, params).map_err(entity_error)?;
        item.on_create(&id, context).await.map_err(entity_error)?;

        let record = Versioned::new(self.next_version(), item);
        self.store.insert(id.clone(), record.clone());
        self.publish(Change::Created {
            id,
            record: record.clone(),
        });
        Ok(record)
    }

    async fn update(
        &mut self,
        id: T::Id,
        expected: Option<u64>,
        update: T::Update,
        context: &T::Context,
    ) -> Result<Versioned<T>, FrameworkError> {
        let current = self.checked(&id, expected)?;
        let mut working = current.value;
        working.on_update(update, context).await.map_err(entity_error)?;

        let record = Versioned::new(self.next_version(), working);
        self.store.insert(id.clone(), record.clone());
        self.publish(Change::Updated {
            id,
            record: record.clone(),
        });
        Ok(record)
    }

    async fn action(
        &mut self,
        id: T::Id,
        expected: Option<u64>,
        action: T::Action,
        context: &T::Context,
    ) -> Result<Versioned<T::ActionResult>, FrameworkError> {
        let current = self.checked(&id, expected)?;
        let mut working = current.value;
        let result = working
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;

        let version = self.next_version();
        let record = Versioned::new(version, working);
        self.store.insert(id.clone(), record.clone());
        self.publish(Change::Updated { id, record });
        Ok(Versioned::new(version, result))
    }

    async fn rekey(
        &mut self,
        from: T::Id,
        to: T::Id,
        expected: Option<u64>,
        context: &T::Context,
    ) -> Result<Versioned<T>, FrameworkError> {
        let current = self.checked(&from, expected)?;
        if from == to {
            return Ok(current);
        }
        if self.store.contains_key(&to) {
            return Err(FrameworkError::AlreadyExists(to.to_string()));
        }
        let mut working = current.value;
        working
            .on_rekey(&from, &to, context)
            .await
            .map_err(entity_error)?;

        let record = Versioned::new(self.next_version(), working);
        self.store.remove(&from);
        self.store.insert(to.clone(), record.clone());
        self.publish(Change::Rekeyed {
            from,
            to,
            record: record.clone(),
        });
        Ok(record)
    }

    async fn delete(
        &mut self,
        id: T::Id,
        expected: Option<u64>,
        context: &T::Context,
    ) -> Result<(), FrameworkError> {
        let current = self.checked(&id, expected)?;
        current
            .value
            .on_delete(&id, context)
            .await
            .map_err(entity_error)?;

        self.store.remove(&id);
        self.publish(Change::Removed {
            id,
            version: current.version,
        });
        Ok(())
    }

    /// Version for the write being committed. Only called once every hook has passed.
    fn next_version(&mut self) -> u64 {
        self.last_version += 1;
        self.last_version
    }

    /// Looks up a record and enforces the caller's expected version.
    fn checked(&self, id: &T::Id, expected: Option<u64>) -> Result<Versioned<T>, FrameworkError> {
        let current = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        match expected {
            Some(expected) if expected != current.version => Err(FrameworkError::VersionConflict {
                id: id.to_string(),
                expected,
                actual: current.version,
            }),
            _ => Ok(current),
        }
    }

    fn publish(&self, change: Change<T>) {
        // No subscribers is not an error.
        let _ = self.feed.send(change);
    }
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

fn log_outcome<R>(entity_type: &str, ok: &str, result: &Result<R, FrameworkError>) {
    match result {
        Ok(_) => info!(entity_type, "{ok}"),
        Err(e) => warn!(entity_type, error = %e, "Request failed"),
    }
}
