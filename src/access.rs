//! Page guard: who may open which page.
//!
//! Mirrors what every staff page does on load: no signed-in identity goes to the
//! login page; a role that may not open the page goes back to the home page.
use crate::clients::ProfileClient;
use crate::model::{Identity, Page, Role};
use crate::profile_actor::ProfileError;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted(Role),
    Redirect(Redirect),
}

/// Resolves identities to roles through the profile store.
#[derive(Clone)]
pub struct RoleResolver {
    profiles: ProfileClient,
}

impl RoleResolver {
    pub fn new(profiles: ProfileClient) -> Self {
        Self { profiles }
    }

    /// Role of a signed-in account; guest when it has no profile.
    pub async fn resolve(&self, identity: &Identity) -> Result<Role, ProfileError> {
        self.profiles.role_of(&identity.uid).await
    }

    #[instrument(skip(self))]
    pub async fn authorize(&self, identity: Option<&Identity>, page: Page) -> Result<Access, ProfileError> {
        let access = match identity {
            None if page.is_public() => Access::Granted(Role::Guest),
            None => Access::Redirect(Redirect::Login),
            Some(identity) => {
                let role = self.resolve(identity).await?;
                if role.can_open(page) {
                    Access::Granted(role)
                } else {
                    Access::Redirect(Redirect::Home)
                }
            }
        };
        debug!(?access, "Page access decided");
        Ok(access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyed_actor::mock::MockClient;
    use crate::model::UserProfile;

    fn profile(role: Option<Role>) -> UserProfile {
        UserProfile {
            email: "ana@canteen.io".into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_anonymous_visitors() {
        let mock = MockClient::<UserProfile>::new();
        let resolver = RoleResolver::new(ProfileClient::new(mock.client()));

        assert_eq!(
            resolver.authorize(None, Page::Kitchen).await.unwrap(),
            Access::Redirect(Redirect::Login)
        );
        assert_eq!(
            resolver.authorize(None, Page::TvBoard).await.unwrap(),
            Access::Granted(Role::Guest)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_role_from_profile_decides_page() {
        let mut mock = MockClient::<UserProfile>::new();
        mock.expect_get("u1".into()).return_ok(Some(profile(Some(Role::Kitchen))));
        mock.expect_get("u1".into()).return_ok(Some(profile(Some(Role::Kitchen))));
        let resolver = RoleResolver::new(ProfileClient::new(mock.client()));
        let ana = Identity::new("u1", "ana@canteen.io");

        assert_eq!(
            resolver.authorize(Some(&ana), Page::Kitchen).await.unwrap(),
            Access::Granted(Role::Kitchen)
        );
        assert_eq!(
            resolver.authorize(Some(&ana), Page::Delivery).await.unwrap(),
            Access::Redirect(Redirect::Home)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_profile_or_role_is_guest() {
        let mut mock = MockClient::<UserProfile>::new();
        mock.expect_get("u2".into()).return_ok(None);
        mock.expect_get("u2".into()).return_ok(Some(profile(None)));
        let resolver = RoleResolver::new(ProfileClient::new(mock.client()));
        let bo = Identity::new("u2", "bo@canteen.io");

        assert_eq!(resolver.resolve(&bo).await.unwrap(), Role::Guest);
        assert_eq!(
            resolver.authorize(Some(&bo), Page::Home).await.unwrap(),
            Access::Granted(Role::Guest)
        );
        mock.verify();
    }
}
