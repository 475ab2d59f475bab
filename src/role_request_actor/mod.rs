//! # Role Request Actor
//!
//! The approve/reject queue for staff roles (`pending → approved | rejected`).
//!
//! ## Dependencies
//!
//! This actor's context is `(ProfileClient, AuditClient)`, injected at `run()`:
//!
//! ```rust,ignore
//! let (profile_actor, profile_client) = profile_actor::new(32);
//! let (audit_actor, audit_client) = audit_actor::new(32, 500);
//! let (request_actor, request_client) = role_request_actor::new(32);
//!
//! tokio::spawn(profile_actor.run(()));
//! tokio::spawn(audit_actor.run(()));
//! tokio::spawn(request_actor.run((profile_client.clone(), audit_client.clone())));
//! ```
//!
//! Tests swap both clients for [`MockClient`](keyed_actor::mock::MockClient)s; see
//! `tests/role_request_actor_test.rs`.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::RoleRequestClient;
use crate::model::RoleRequest;
use keyed_actor::ResourceActor;

/// Creates a new RoleRequest actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<RoleRequest>, RoleRequestClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RoleRequestClient::new(generic_client))
}
