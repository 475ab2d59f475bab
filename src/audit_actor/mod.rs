//! # Audit Actor
//!
//! Append-only log of account events. Keys are sequential [`AuditId`](crate::model::AuditId)s handed out by
//! the [`AuditClient`]; the `on_delete` hook refuses every removal.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AuditClient;
use crate::model::AuditRecord;
use keyed_actor::ResourceActor;

/// Creates a new Audit actor and a client whose queries return at most `limit` records.
pub fn new(buffer_size: usize, limit: usize) -> (ResourceActor<AuditRecord>, AuditClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AuditClient::new(generic_client, limit))
}
