use crate::model::{ProfileCreate, ProfileUpdate, UserProfile};
use crate::profile_actor::ProfileError;
use async_trait::async_trait;
use keyed_actor::ActorEntity;
use std::convert::Infallible;

fn checked_email(email: String) -> Result<String, ProfileError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(ProfileError::InvalidEmail(email));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl ActorEntity for UserProfile {
    type Id = String;
    type Create = ProfileCreate;
    type Update = ProfileUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = ProfileError;

    fn from_create_params(_uid: &String, params: ProfileCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            email: checked_email(params.email)?,
            role: params.role,
        })
    }

    /// Merge: fields left `None` keep their stored value.
    async fn on_update(&mut self, update: ProfileUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(email) = update.email {
            self.email = checked_email(email)?;
        }
        if let Some(role) = update.role {
            self.role = Some(role);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
