//! # System Lifecycle
//!
//! Starting, wiring and stopping the canteen's actors.
//!
//! Actors are created without their dependencies. Dependencies are injected when
//! each actor is started with `run(context)`: the role-request actor receives a
//! profile client and an audit client, the others run with `()`.
//!
//! Shutdown is cooperative. Dropping every client closes each actor's request
//! channel, the actor drains what is queued and its task ends.
mod system;

pub use system::CanteenSystem;
