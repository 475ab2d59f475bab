//! # Profile Actor
//!
//! User profiles (`email`, `role`) keyed by account uid. No dependencies, no custom
//! actions; writes are merge updates.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProfileClient;
use crate::model::UserProfile;
use keyed_actor::ResourceActor;

/// Creates a new Profile actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<UserProfile>, ProfileClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProfileClient::new(generic_client))
}
