use crate::audit_actor::AuditError;
use crate::model::{AuditId, AuditRecord};
use async_trait::async_trait;
use keyed_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for AuditRecord {
    type Id = AuditId;
    type Create = AuditRecord;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = AuditError;

    fn from_create_params(_id: &AuditId, record: AuditRecord) -> Result<Self, Self::Error> {
        Ok(record)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn on_delete(&self, _id: &AuditId, _ctx: &()) -> Result<(), Self::Error> {
        Err(AuditError::AppendOnly)
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
