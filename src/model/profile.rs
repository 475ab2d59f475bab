//! User profiles keyed by account uid.
use crate::model::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    /// Absent on profiles created before roles existed; read as guest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserProfile {
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or(Role::Guest)
    }
}

/// Payload for creating a profile.
#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub email: String,
    pub role: Option<Role>,
}

/// Merge update: only the fields that are `Some` are written.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub role: Option<Role>,
}
