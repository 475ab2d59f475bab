//! Append-only audit trail of account events.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuditId(pub u64);

impl fmt::Display for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audit_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Login,
    Signup,
    GoogleLogin,
    RoleApproved,
    RoleRejected,
    RoleChanged,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Login => "login",
            AuditAction::Signup => "signup",
            AuditAction::GoogleLogin => "google_login",
            AuditAction::RoleApproved => "role_approved",
            AuditAction::RoleRejected => "role_rejected",
            AuditAction::RoleChanged => "role_changed",
        }
    }

    /// Heading shown on the log card, e.g. `GOOGLE LOGIN`.
    pub fn label(self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub action: AuditAction,
    #[serde(rename = "actorUID")]
    pub actor_uid: String,
    pub actor_email: String,
    #[serde(rename = "targetUID")]
    pub target_uid: String,
    pub target_email: String,
    pub details: String,
    pub timestamp: i64,
}

impl AuditRecord {
    /// Whether any of details, actor email or target email contains `needle`
    /// (already lowercased).
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        [&self.details, &self.actor_email, &self.target_email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Audit log query. Empty fields do not filter.
///
/// `actor`, `target` and `search` are case-insensitive substring matches; `from`
/// and `to` bound the timestamp inclusively.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub action: Option<AuditAction>,
    pub actor: Option<String>,
    pub target: Option<String>,
    pub search: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl AuditFilter {
    pub fn matches(&self, record: &AuditRecord) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            needle
                .as_deref()
                .map(str::to_lowercase)
                .is_none_or(|n| haystack.to_lowercase().contains(&n))
        }

        self.action.is_none_or(|a| a == record.action)
            && contains(&record.actor_email, &self.actor)
            && contains(&record.target_email, &self.target)
            && self
                .search
                .as_deref()
                .map(str::to_lowercase)
                .is_none_or(|n| record.mentions(&n))
            && self.from.is_none_or(|from| record.timestamp >= from)
            && self.to.is_none_or(|to| record.timestamp <= to)
    }
}
