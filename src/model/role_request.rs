//! Requests from signed-in users to be granted a staff role.
use crate::model::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A signed-in account acting on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// One request per account, keyed by the requester's uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub uid: String,
    pub email: String,
    pub status: RequestStatus,
    pub requested_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RoleRequestCreate {
    pub email: String,
    pub requested_at: i64,
}

/// Decisions an administrator takes on a pending request.
#[derive(Debug, Clone)]
pub enum RoleDecision {
    Approve { role: Role, by: Identity, at: i64 },
    Reject { by: Identity, at: i64 },
}
