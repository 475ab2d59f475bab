//! # Profile Client
use crate::model::{ProfileCreate, ProfileUpdate, Role, UserProfile};
use crate::profile_actor::ProfileError;
use async_trait::async_trait;
use keyed_actor::{ActorClient, FrameworkError, ResourceClient, Versioned};
use tracing::{debug, info, instrument};

/// Client for interacting with the Profile actor.
#[derive(Clone)]
pub struct ProfileClient {
    inner: ResourceClient<UserProfile>,
}

impl ProfileClient {
    pub fn new(inner: ResourceClient<UserProfile>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_profile(
        &self,
        uid: &str,
        email: &str,
        role: Option<Role>,
    ) -> Result<Versioned<UserProfile>, ProfileError> {
        let params = ProfileCreate {
            email: email.to_string(),
            role,
        };
        self.inner
            .create(uid.to_string(), params)
            .await
            .map_err(Self::map_error)
    }

    /// The role the dashboard should apply: guest when there is no profile or the
    /// profile carries no role.
    #[instrument(skip(self))]
    pub async fn role_of(&self, uid: &str) -> Result<Role, ProfileError> {
        let role = self
            .get(uid.to_string())
            .await?
            .map(|profile| profile.value.effective_role())
            .unwrap_or(Role::Guest);
        debug!(%role, "Resolved role");
        Ok(role)
    }

    /// Merge-writes `{ email, role }`, creating the profile when it does not exist.
    #[instrument(skip(self))]
    pub async fn assign_role(
        &self,
        uid: &str,
        email: &str,
        role: Role,
    ) -> Result<Versioned<UserProfile>, ProfileError> {
        let update = ProfileUpdate {
            email: Some(email.to_string()),
            role: Some(role),
        };
        match self.inner.update(uid.to_string(), None, update).await {
            Err(FrameworkError::NotFound(_)) => {
                info!("No profile yet, creating one");
                self.create_profile(uid, email, Some(role)).await
            }
            other => other.map_err(Self::map_error),
        }
    }

    /// Undoes an [`assign_role`](Self::assign_role): writes back the profile as it
    /// was, or removes the one `assign_role` created.
    #[instrument(skip(self, previous))]
    pub async fn restore(&self, uid: &str, previous: Option<UserProfile>) -> Result<(), ProfileError> {
        match previous {
            Some(profile) => {
                let update = ProfileUpdate {
                    email: Some(profile.email.clone()),
                    role: Some(profile.effective_role()),
                };
                self.inner
                    .update(uid.to_string(), None, update)
                    .await
                    .map(|_| ())
                    .map_err(Self::map_error)
            }
            None => self.delete(uid.to_string()).await,
        }
    }

    /// Direct role change from the role administration page.
    #[instrument(skip(self))]
    pub async fn set_role(
        &self,
        acting: Role,
        uid: &str,
        role: Role,
    ) -> Result<Versioned<UserProfile>, ProfileError> {
        if acting != Role::Admin {
            return Err(ProfileError::Unauthorized(acting));
        }
        let update = ProfileUpdate {
            role: Some(role),
            ..Default::default()
        };
        self.inner
            .update(uid.to_string(), None, update)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<UserProfile> for ProfileClient {
    type Error = ProfileError;

    fn inner(&self) -> &ResourceClient<UserProfile> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(uid) => ProfileError::NotFound(uid),
            FrameworkError::AlreadyExists(uid) => ProfileError::AlreadyExists(uid),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProfileError>() {
                Ok(profile_error) => *profile_error,
                Err(other) => ProfileError::ActorCommunicationError(other.to_string()),
            },
            other => ProfileError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyed_actor::mock::MockClient;

    fn spawn_profiles() -> ProfileClient {
        let (actor, client) = crate::profile_actor::new(8);
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn test_set_role_is_admin_only() {
        // No expectations: a request reaching the mock would fail the test.
        let mock = MockClient::<UserProfile>::new();
        let profiles = ProfileClient::new(mock.client());

        for acting in [Role::Counter, Role::Delivery, Role::Guest] {
            assert_eq!(
                profiles.set_role(acting, "uid-ana", Role::Kitchen).await.unwrap_err(),
                ProfileError::Unauthorized(acting)
            );
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_set_role_merges_into_existing_profile() {
        let profiles = spawn_profiles();
        profiles.create_profile("uid-ana", "ana@canteen.test", None).await.unwrap();

        let changed = profiles.set_role(Role::Admin, "uid-ana", Role::Kitchen).await.unwrap();
        assert_eq!(changed.value.email, "ana@canteen.test");
        assert_eq!(changed.value.role, Some(Role::Kitchen));
        assert_eq!(profiles.role_of("uid-ana").await.unwrap(), Role::Kitchen);

        let missing = profiles.set_role(Role::Admin, "uid-nobody", Role::Kitchen).await;
        assert_eq!(missing.unwrap_err(), ProfileError::NotFound("uid-nobody".into()));
    }

    #[tokio::test]
    async fn test_restore_undoes_assign_role() {
        let profiles = spawn_profiles();
        profiles
            .create_profile("uid-ana", "ana@canteen.test", Some(Role::Display))
            .await
            .unwrap();
        let before = profiles.get("uid-ana".to_string()).await.unwrap().map(|p| p.value);

        profiles.assign_role("uid-ana", "ana@canteen.test", Role::Delivery).await.unwrap();
        profiles.restore("uid-ana", before).await.unwrap();
        assert_eq!(profiles.role_of("uid-ana").await.unwrap(), Role::Display);

        profiles.assign_role("uid-bo", "bo@canteen.test", Role::Delivery).await.unwrap();
        profiles.restore("uid-bo", None).await.unwrap();
        assert!(profiles.get("uid-bo".to_string()).await.unwrap().is_none());
    }
}
