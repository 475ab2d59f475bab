//! # Order Actor
//!
//! Owns every order of every counter, keyed by [`OrderKey`](crate::model::OrderKey).
//!
//! ## Structure
//!
//! - [`entity`]: [`ActorEntity`](keyed_actor::ActorEntity) implementation for [`Order`]
//! - [`transitions`]: the lifecycle table, as `Order::apply`
//! - [`error`]: [`OrderError`]
//! - [`new()`]: factory returning the actor and an [`OrderClient`]
//!
//! ## Usage
//!
//! ```rust
//! use order_board::model::{OrderKey, OrderStatus, Role};
//! use order_board::order_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = order_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let key = OrderKey::canteen("12");
//!     client.place_order(Role::Counter, key.clone()).await?;
//!     let accepted = client.accept(Role::Kitchen, &key, Some(1)).await?;
//!     assert_eq!(accepted.value.status, OrderStatus::InPreparation);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;
pub mod transitions;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use keyed_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
