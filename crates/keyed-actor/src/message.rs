//! # Generic Messages
//!
//! This module defines the message types exchanged between the `ResourceClient` and
//! the `ResourceActor`, the versioned record wrapper, and the change events broadcast
//! after every committed write.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A value stamped with the version of the record it belongs to.
///
/// Every committed write (create, update, action, rekey) takes the next value of
/// the actor's version counter, so versions grow per record and are never reused
/// across records. Writers pass the version they last saw to get
/// optimistic-concurrency protection.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: u64, value: T) -> Self {
        Self { version, value }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            version: self.version,
            value: f(self.value),
        }
    }
}

/// Event published on the change feed after a write is committed.
#[derive(Debug, Clone)]
pub enum Change<T: ActorEntity> {
    Created {
        id: T::Id,
        record: Versioned<T>,
    },
    Updated {
        id: T::Id,
        record: Versioned<T>,
    },
    Rekeyed {
        from: T::Id,
        to: T::Id,
        record: Versioned<T>,
    },
    Removed {
        id: T::Id,
        version: u64,
    },
}

/// Predicate used by bulk removal.
pub struct Selector<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Selector<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Selector(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The variants are the store primitives: create under a fresh key, point read, full
/// snapshot, merge update, custom action, atomic rename, point delete and bulk
/// delete. Every mutating variant except `Purge` takes an optional expected version.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        id: T::Id,
        params: T::Create,
        respond_to: Response<Versioned<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>>,
    },
    List {
        respond_to: Response<Vec<(T::Id, Versioned<T>)>>,
    },
    Update {
        id: T::Id,
        expected: Option<u64>,
        update: T::Update,
        respond_to: Response<Versioned<T>>,
    },
    Action {
        id: T::Id,
        expected: Option<u64>,
        action: T::Action,
        respond_to: Response<Versioned<T::ActionResult>>,
    },
    Rekey {
        from: T::Id,
        to: T::Id,
        expected: Option<u64>,
        respond_to: Response<Versioned<T>>,
    },
    Delete {
        id: T::Id,
        expected: Option<u64>,
        respond_to: Response<()>,
    },
    Purge {
        selector: Selector<T>,
        respond_to: Response<Vec<T::Id>>,
    },
}
