//! # Role Request Client
use crate::clock::{system_clock, Clock};
use crate::model::{Identity, RequestStatus, Role, RoleDecision, RoleRequest, RoleRequestCreate};
use crate::role_request_actor::RoleRequestError;
use async_trait::async_trait;
use keyed_actor::{ActorClient, FrameworkError, ResourceClient, Versioned};
use tracing::instrument;

/// Client for interacting with the RoleRequest actor.
#[derive(Clone)]
pub struct RoleRequestClient {
    inner: ResourceClient<RoleRequest>,
    clock: Clock,
}

impl RoleRequestClient {
    pub fn new(inner: ResourceClient<RoleRequest>) -> Self {
        Self {
            inner,
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn admin_only(acting: Role) -> Result<(), RoleRequestError> {
        if acting == Role::Admin {
            Ok(())
        } else {
            Err(RoleRequestError::Unauthorized(acting))
        }
    }

    /// Files a request on behalf of `who`.
    #[instrument(skip(self))]
    pub async fn submit(&self, who: &Identity) -> Result<Versioned<RoleRequest>, RoleRequestError> {
        let params = RoleRequestCreate {
            email: who.email.clone(),
            requested_at: (self.clock)(),
        };
        self.inner
            .create(who.uid.clone(), params)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        acting: Role,
        by: &Identity,
        uid: &str,
        role: Role,
    ) -> Result<RoleRequest, RoleRequestError> {
        Self::admin_only(acting)?;
        let decision = RoleDecision::Approve {
            role,
            by: by.clone(),
            at: (self.clock)(),
        };
        self.decide(uid, decision).await
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, acting: Role, by: &Identity, uid: &str) -> Result<RoleRequest, RoleRequestError> {
        Self::admin_only(acting)?;
        let decision = RoleDecision::Reject {
            by: by.clone(),
            at: (self.clock)(),
        };
        self.decide(uid, decision).await
    }

    async fn decide(&self, uid: &str, decision: RoleDecision) -> Result<RoleRequest, RoleRequestError> {
        self.inner
            .perform_action(uid.to_string(), None, decision)
            .await
            .map(|decided| decided.value)
            .map_err(Self::map_error)
    }

    /// Pending requests, oldest first.
    #[instrument(skip(self))]
    pub async fn pending(&self) -> Result<Vec<RoleRequest>, RoleRequestError> {
        let mut pending: Vec<RoleRequest> = self
            .list()
            .await?
            .into_iter()
            .map(|(_, request)| request.value)
            .filter(|request| request.status == RequestStatus::Pending)
            .collect();
        pending.sort_by_key(|request| request.requested_at);
        Ok(pending)
    }
}

#[async_trait]
impl ActorClient<RoleRequest> for RoleRequestClient {
    type Error = RoleRequestError;

    fn inner(&self) -> &ResourceClient<RoleRequest> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(uid) => RoleRequestError::NotFound(uid),
            FrameworkError::AlreadyExists(uid) => RoleRequestError::AlreadyRequested(uid),
            FrameworkError::EntityError(inner) => match inner.downcast::<RoleRequestError>() {
                Ok(request_error) => *request_error,
                Err(other) => RoleRequestError::ActorCommunicationError(other.to_string()),
            },
            other => RoleRequestError::ActorCommunicationError(other.to_string()),
        }
    }
}
