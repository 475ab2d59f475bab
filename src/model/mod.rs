//! Plain records and DTOs. The `ActorEntity` implementations live next to each actor.

pub mod audit;
pub mod order;
pub mod profile;
pub mod role;
pub mod role_request;

pub use audit::*;
pub use order::*;
pub use profile::*;
pub use role::*;
pub use role_request::*;
