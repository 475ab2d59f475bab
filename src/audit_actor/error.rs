//! Error types for the Audit actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuditError {
    /// Audit records are never removed.
    #[error("Audit log is append-only")]
    AppendOnly,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AuditError {
    fn from(msg: String) -> Self {
        AuditError::ActorCommunicationError(msg)
    }
}
