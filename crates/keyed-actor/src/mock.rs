//! # Mocks for Domain Clients
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered
//! from a queue of expectations instead of a running actor. Domain clients (and
//! actors whose context holds other clients) can then be tested without spawning
//! their dependencies.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, answers are scripted | Keyed, versioned store |
//! | **Error injection** | `return_err(..)` | Needs the right store state |
//! | **Use case** | Logic *around* a client | The actor itself, full system |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (kind or key) panics the mock task, which the caller observes as
//! [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use keyed_actor::mock::MockClient;
//! use keyed_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Seat { row: u8 }
//! #[derive(Debug)] struct SeatCreate;
//! #[derive(Debug)] struct SeatUpdate;
//! #[derive(Debug)] enum SeatAction {}
//! #[derive(Debug, thiserror::Error)] #[error("seat")] struct SeatError;
//!
//! #[async_trait]
//! impl ActorEntity for Seat {
//!     type Id = u32; type Create = SeatCreate; type Update = SeatUpdate;
//!     type Action = SeatAction; type ActionResult = (); type Context = (); type Error = SeatError;
//!     fn from_create_params(_: &u32, _: SeatCreate) -> Result<Self, SeatError> { Ok(Self { row: 1 }) }
//!     async fn on_update(&mut self, _: SeatUpdate, _: &()) -> Result<(), SeatError> { Ok(()) }
//!     async fn handle_action(&mut self, a: SeatAction, _: &()) -> Result<(), SeatError> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Seat>::new();
//!     mock.expect_get(4).at_version(3).return_ok(Some(Seat { row: 2 }));
//!     mock.expect_delete(4).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let seat = client.get(4).await.unwrap().unwrap();
//!     assert_eq!((seat.version, seat.value.row), (3, 2));
//!     assert!(matches!(client.delete(4, None).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! For finer control, [`create_mock_client`] returns the raw request receiver and the
//! `expect_*` free functions pull typed requests off it.

use crate::actor::FEED_CAPACITY;
use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Change, ResourceRequest, Versioned};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply<T: ActorEntity> {
    Get(Result<Option<Versioned<T>>, FrameworkError>),
    Create(Result<Versioned<T>, FrameworkError>),
    List(Result<Vec<(T::Id, Versioned<T>)>, FrameworkError>),
    Update(Result<Versioned<T>, FrameworkError>),
    Action(Result<Versioned<T::ActionResult>, FrameworkError>),
    Rekey(Result<Versioned<T>, FrameworkError>),
    Delete(Result<(), FrameworkError>),
}

struct Expectation<T: ActorEntity> {
    id: Option<T::Id>,
    reply: Reply<T>,
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn check_id<T: ActorEntity>(kind: &str, expected: &Option<T::Id>, actual: &T::Id) {
    if let Some(expected) = expected {
        if expected != actual {
            panic!("{kind}: expected key {expected}, got {actual}");
        }
    }
}

/// A scripted stand-in for a `ResourceActor`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    feed: broadcast::Sender<Change<T>>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&queue).pop_front();
                let Some(Expectation { id: expected, reply }) = next else {
                    panic!("Unexpected request with no expectation left: {request:?}");
                };

                match (request, reply) {
                    (ResourceRequest::Get { id, respond_to }, Reply::Get(response)) => {
                        check_id::<T>("get", &expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { id, respond_to, .. }, Reply::Create(response)) => {
                        check_id::<T>("create", &expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Reply::List(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Reply::Update(response)) => {
                        check_id::<T>("update", &expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Reply::Action(response)) => {
                        check_id::<T>("action", &expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Rekey { from, respond_to, .. }, Reply::Rekey(response)) => {
                        check_id::<T>("rekey", &expected, &from);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to, .. }, Reply::Delete(response)) => {
                        check_id::<T>("delete", &expected, &id);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, feed.clone()),
            feed,
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Pushes a change event to every subscriber of the mock's feed.
    pub fn publish(&self, change: Change<T>) {
        let _ = self.feed.send(change);
    }

    fn builder<R>(
        &self,
        id: Option<T::Id>,
        wrap: fn(u64, Result<R, FrameworkError>) -> Reply<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            version: 1,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), |v, r| {
            Reply::Get(r.map(|found| found.map(|t| Versioned::new(v, t))))
        })
    }

    pub fn expect_create(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), |v, r| Reply::Create(r.map(|t| Versioned::new(v, t))))
    }

    /// Every listed record is stamped with the builder's version.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<(T::Id, T)>> {
        self.builder(None, |v, r| {
            Reply::List(r.map(|items| {
                items
                    .into_iter()
                    .map(|(id, t)| (id, Versioned::new(v, t)))
                    .collect()
            }))
        })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), |v, r| Reply::Update(r.map(|t| Versioned::new(v, t))))
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), |v, r| Reply::Action(r.map(|t| Versioned::new(v, t))))
    }

    /// Matches on the source key.
    pub fn expect_rekey(&mut self, from: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(from), |v, r| Reply::Rekey(r.map(|t| Versioned::new(v, t))))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), |_, r| Reply::Delete(r))
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder returned by the `expect_*` methods of [`MockClient`].
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    version: u64,
    wrap: fn(u64, Result<R, FrameworkError>) -> Reply<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Version stamped on the returned record (defaults to 1).
    pub fn at_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let reply = (self.wrap)(self.version, response);
        lock(&self.expectations).push_back(Expectation { id: self.id, reply });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
///
/// The test plays the actor: pull a request with one of the `expect_*` helpers, assert
/// on its payload, and answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (feed, _) = broadcast::channel(FEED_CAPACITY);
    (ResourceClient::new(sender, feed), receiver)
}

/// Next message as a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Create,
    oneshot::Sender<Result<Versioned<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create {
            id,
            params,
            respond_to,
        }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Next message as a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    oneshot::Sender<Result<Option<Versioned<T>>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message as an Action request, with its expected version.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    Option<u64>,
    T::Action,
    oneshot::Sender<Result<Versioned<T::ActionResult>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            expected,
            action,
            respond_to,
        }) => Some((id, expected, action, respond_to)),
        _ => None,
    }
}
