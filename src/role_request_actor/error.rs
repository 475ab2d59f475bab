//! Error types for the RoleRequest actor.

use crate::audit_actor::AuditError;
use crate::model::{RequestStatus, Role};
use crate::profile_actor::ProfileError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RoleRequestError {
    #[error("Role request not found: {0}")]
    NotFound(String),

    /// The account already has a request on file.
    #[error("A role request for {0} already exists")]
    AlreadyRequested(String),

    /// Only pending requests can be decided.
    #[error("Request was already {0:?}")]
    AlreadyDecided(RequestStatus),

    /// The role cannot be granted through the request queue.
    #[error("Role {0} cannot be granted by request")]
    NotGrantable(Role),

    /// Only administrators decide requests.
    #[error("Role {0} may not decide role requests")]
    Unauthorized(Role),

    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    /// Writing the granted role to the profile failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Recording the decision in the audit log failed.
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for RoleRequestError {
    fn from(msg: String) -> Self {
        RoleRequestError::ActorCommunicationError(msg)
    }
}
