//! # Order Board
//!
//! Order lifecycle for a canteen: the counter places numbered orders, the kitchen
//! prepares them, delivery hands them out (or sends them back, or records a
//! partial delivery), and a public TV board shows what is ready.
//!
//! ## Architecture
//!
//! Every collection (orders, user profiles, role requests, audit records) is owned
//! by one [`keyed_actor::ResourceActor`] running in its own Tokio task. The actor
//! is the single writer: order-number uniqueness, legal status transitions and
//! optimistic version checks are decided inside it, one message at a time.
//! Clients add what is specific to a caller: role checks, clock stamps and error
//! mapping.
//!
//! Reads for screens go through [`board`]: a [`keyed_actor::LiveView`] kept current
//! by the actor's change feed, projected into kitchen, delivery, counter and TV
//! boards.
//!
//! ## Module Tour
//!
//! - [`model`]: records and their JSON shape.
//! - [`order_actor`], [`profile_actor`], [`role_request_actor`], [`audit_actor`]:
//!   entity behaviour and errors per collection.
//! - [`clients`]: typed APIs over each actor.
//! - [`access`]: page guard resolving identities to roles.
//! - [`board`]: read-side projections and the live feed.
//! - [`config`]: environment configuration.
//! - [`lifecycle`]: starting, wiring and stopping the actors.
//!
//! ## Example
//!
//! ```rust
//! use order_board::config::Config;
//! use order_board::lifecycle::CanteenSystem;
//! use order_board::model::{OrderKey, OrderStatus, Role};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = CanteenSystem::new(&Config::default());
//!     let key = OrderKey::canteen("12");
//!
//!     let placed = system.orders.place_order(Role::Counter, key.clone()).await?;
//!     let accepted = system.orders.accept(Role::Kitchen, &key, Some(placed.version)).await?;
//!     assert_eq!(accepted.value.status, OrderStatus::InPreparation);
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod access;
pub mod audit_actor;
pub mod board;
pub mod clients;
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod profile_actor;
pub mod role_request_actor;
