//! # Keyed Actor
//!
//! A keyed, versioned record store that lives inside one Tokio task. Callers hold a
//! cloneable [`ResourceClient`] and talk to the [`ResourceActor`] over channels; every
//! committed write is also broadcast on a change feed that [`LiveView`]s replay.
//!
//! ## Why an actor?
//!
//! Several screens write the same records at once: the counter places orders, the
//! kitchen and the delivery desk move them along. A shared map guarded by a lock
//! would still leave "read, decide, write" races in every caller. Here the decision
//! is taken by the record's own hook *inside* the actor, so:
//!
//! - creating an occupied key fails with [`FrameworkError::AlreadyExists`] and writes nothing;
//! - a write carrying a stale version fails with [`FrameworkError::VersionConflict`];
//! - a hook that rejects a request leaves the stored record untouched.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the record type, its DTOs and its validation hooks.
//! 2. **Runtime** ([`ResourceActor`]): sequential message processing and the change feed.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests, plus default
//!    `get`/`list`/`delete` for domain clients.
//! 4. **Replica** ([`LiveView`], [`SnapshotDiff`]): client-side copies and what changed.
//!
//! ## Example
//!
//! ```rust
//! use keyed_actor::{ActorEntity, FrameworkError, LiveView, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Table { seats: u8, occupied: bool }
//!
//! #[derive(Debug)] struct TableCreate { seats: u8 }
//! #[derive(Debug)] struct TableUpdate { seats: Option<u8> }
//! #[derive(Debug)] enum TableAction { Seat }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum TableError {
//!     #[error("table already occupied")]
//!     Occupied,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Table {
//!     type Id = u16;
//!     type Create = TableCreate;
//!     type Update = TableUpdate;
//!     type Action = TableAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = TableError;
//!
//!     fn from_create_params(_id: &u16, params: TableCreate) -> Result<Self, TableError> {
//!         Ok(Self { seats: params.seats, occupied: false })
//!     }
//!
//!     async fn on_update(&mut self, update: TableUpdate, _: &()) -> Result<(), TableError> {
//!         if let Some(seats) = update.seats { self.seats = seats; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: TableAction, _: &()) -> Result<(), TableError> {
//!         match action {
//!             TableAction::Seat if self.occupied => Err(TableError::Occupied),
//!             TableAction::Seat => { self.occupied = true; Ok(()) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Table>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(12, TableCreate { seats: 4 }).await.unwrap();
//!     let dup = client.create(12, TableCreate { seats: 2 }).await;
//!     assert!(matches!(dup, Err(FrameworkError::AlreadyExists(_))));
//!
//!     let (mut view, mut feed) = LiveView::open(&client).await.unwrap();
//!
//!     let seated = client.perform_action(12, Some(1), TableAction::Seat).await.unwrap();
//!     assert_eq!(seated.version, 2);
//!
//!     // Same expected version again: someone else already wrote version 2.
//!     let stale = client.perform_action(12, Some(1), TableAction::Seat).await;
//!     assert!(matches!(stale, Err(FrameworkError::VersionConflict { actual: 2, .. })));
//!
//!     let diff = view.apply(feed.recv().await.unwrap());
//!     assert_eq!(diff.changed, vec![12]);
//!     assert!(view.get(&12).unwrap().value.occupied);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to `run(context)`, not to `new()`. All actors can be
//! created first and wired afterwards, so an actor whose hooks call another actor
//! simply receives that actor's client as its `Context`.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from scripted expectations,
//! which is how actors with dependencies are tested in isolation.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod view;

pub use actor::{ResourceActor, FEED_CAPACITY};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Change, ResourceRequest, Response, Selector, Versioned};
pub use view::{LiveView, SnapshotDiff};
