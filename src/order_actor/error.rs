//! Error types for the Order actor.

use crate::model::{OrderStatus, Role, Station};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// No order is stored under the key.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The counter already has an order with this number.
    #[error("Order {0} already exists")]
    DuplicateNumber(String),

    /// Empty number on placement or renumbering, or a non-numeric status lookup.
    #[error("Invalid order number: {0:?}")]
    InvalidNumber(String),

    /// The requested step is not allowed from the order's current status.
    #[error("Cannot {transition} an order that is {from}")]
    InvalidTransition {
        from: OrderStatus,
        transition: &'static str,
    },

    /// Renumbering is only allowed while the order is waiting.
    #[error("Order is {0} and can no longer be edited")]
    NotEditable(OrderStatus),

    /// Re-queueing needs a delay reason.
    #[error("A delay reason is required")]
    MissingReason,

    /// The order changed since the caller read it.
    #[error("Order changed meanwhile (expected version {expected}, found {actual})")]
    StaleVersion { expected: u64, actual: u64 },

    /// The acting role may not write through this station.
    #[error("Role {role} may not use the {station:?} station")]
    Unauthorized { role: Role, station: Station },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
