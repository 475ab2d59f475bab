//! Error types for the Profile actor.

use crate::model::Role;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile {0} already exists")]
    AlreadyExists(String),

    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    /// Only administrators change roles directly.
    #[error("Role {0} may not change roles")]
    Unauthorized(Role),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProfileError {
    fn from(msg: String) -> Self {
        ProfileError::ActorCommunicationError(msg)
    }
}
