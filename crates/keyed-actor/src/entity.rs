//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every record type (orders, profiles,
//! role requests, audit entries) implements to be kept by the generic `ResourceActor`.
//! It names the key, the DTOs, the custom actions, the injected context and the error
//! type, and provides the lifecycle hooks the actor calls around every write.
//!
//! # Keys
//! Keys are supplied by the caller. An order is stored under the number the counter
//! typed, a profile under the account uid. The actor guarantees a key is never
//! occupied twice; the check and the insert happen in the same message.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_rekey`]
//! - [`ActorEntity::on_delete`]
//!
//! The defaults do nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any keyed record must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can call other actors. The `Context` type
/// is injected into every hook when the actor starts (`run(context)`), not when it is
/// constructed.
///
/// # Atomicity
/// Hooks receive `&mut self` on a working copy. The actor only commits the copy (and
/// bumps the version) when the hook returns `Ok`, so a failed hook never leaves a
/// half-applied record behind.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The caller-supplied key. `Ord` gives snapshots a stable order.
    type Id: Ord + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// A merge-style update of an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. an order transition).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: every action of an actor
    /// returns the same error type, so clients pattern-match a single enum.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from its key and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: &Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the record is inserted.
    async fn on_create(&mut self, _id: &Self::Id, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before a record is moved from one key to another.
    /// Returning an error keeps the record under its old key.
    async fn on_rekey(
        &mut self,
        _from: &Self::Id,
        _to: &Self::Id,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _id: &Self::Id, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
