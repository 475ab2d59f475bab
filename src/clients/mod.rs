//! Typed wrappers around [`ResourceClient`](keyed_actor::ResourceClient), one per actor.

pub mod audit_client;
pub mod order_client;
pub mod profile_client;
pub mod role_request_client;

pub use audit_client::*;
pub use order_client::*;
pub use profile_client::*;
pub use role_request_client::*;
