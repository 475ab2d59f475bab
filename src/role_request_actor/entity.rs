//! [`ActorEntity`] implementation for [`RoleRequest`].
//!
//! Deciding a request has side effects on two other actors: approval merge-writes
//! the role into the requester's profile, and both decisions are recorded in the
//! audit log. Both happen inside `handle_action`, before the new status is
//! committed; if either write fails the request stays pending. When the audit write
//! fails after the role was granted, the profile is put back as it was.

use crate::audit_actor::AuditError;
use crate::clients::{AuditClient, ProfileClient};
use crate::model::{
    AuditAction, AuditRecord, Identity, RequestStatus, Role, RoleDecision, RoleRequest,
    RoleRequestCreate,
};
use crate::role_request_actor::RoleRequestError;
use async_trait::async_trait;
use keyed_actor::{ActorClient, ActorEntity};
use std::convert::Infallible;
use tracing::{error, info, warn};

impl RoleRequest {
    fn audit_entry(&self, action: AuditAction, by: &Identity, details: String, at: i64) -> AuditRecord {
        AuditRecord {
            action,
            actor_uid: by.uid.clone(),
            actor_email: by.email.clone(),
            target_uid: self.uid.clone(),
            target_email: self.email.clone(),
            details,
            timestamp: at,
        }
    }

    async fn record(&self, audit: &AuditClient, entry: AuditRecord) -> Result<(), AuditError> {
        audit.record(entry).await.map(|_| ())
    }
}

#[async_trait]
impl ActorEntity for RoleRequest {
    type Id = String;
    type Create = RoleRequestCreate;
    type Update = Infallible;
    type Action = RoleDecision;
    type ActionResult = RoleRequest;
    type Context = (ProfileClient, AuditClient);
    type Error = RoleRequestError;

    fn from_create_params(uid: &String, params: RoleRequestCreate) -> Result<Self, Self::Error> {
        let email = params.email.trim();
        if email.is_empty() {
            return Err(RoleRequestError::InvalidEmail(params.email));
        }
        Ok(Self {
            uid: uid.clone(),
            email: email.to_string(),
            status: RequestStatus::Pending,
            requested_at: params.requested_at,
            granted_role: None,
            decided_by: None,
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &Self::Context) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        decision: RoleDecision,
        ctx: &Self::Context,
    ) -> Result<RoleRequest, Self::Error> {
        let (profiles, audit) = ctx;
        if self.status != RequestStatus::Pending {
            return Err(RoleRequestError::AlreadyDecided(self.status));
        }

        match decision {
            RoleDecision::Approve { role, by, at } => {
                if !Role::REQUESTABLE.contains(&role) {
                    return Err(RoleRequestError::NotGrantable(role));
                }
                let previous = profiles.get(self.uid.clone()).await?.map(|found| found.value);
                profiles.assign_role(&self.uid, &self.email, role).await?;
                let entry = self.audit_entry(AuditAction::RoleApproved, &by, format!("Granted {role}"), at);
                if let Err(e) = self.record(audit, entry).await {
                    warn!(uid = %self.uid, error = %e, "Audit write failed, restoring profile");
                    if let Err(restore) = profiles.restore(&self.uid, previous).await {
                        error!(uid = %self.uid, error = %restore, "Profile restore failed");
                    }
                    return Err(e.into());
                }

                info!(uid = %self.uid, %role, by = %by.email, "Role request approved");
                self.status = RequestStatus::Approved;
                self.granted_role = Some(role);
                self.decided_by = Some(by.email);
            }
            RoleDecision::Reject { by, at } => {
                let entry = self.audit_entry(AuditAction::RoleRejected, &by, "Request rejected".to_string(), at);
                self.record(audit, entry).await?;

                info!(uid = %self.uid, by = %by.email, "Role request rejected");
                self.status = RequestStatus::Rejected;
                self.decided_by = Some(by.email);
            }
        }
        Ok(self.clone())
    }
}
