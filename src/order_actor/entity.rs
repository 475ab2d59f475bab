//! [`ActorEntity`] implementation for [`Order`].
//!
//! The actor is the single writer for every order, so the checks below are
//! authoritative: key validity on create and rename, the waiting-only rule for
//! renames, and the transition table (see [`super::transitions`]).

use crate::model::{Order, OrderCreate, OrderKey, OrderStatus, OrderTransition};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use keyed_actor::ActorEntity;
use std::convert::Infallible;

pub(crate) fn validate_key(key: &OrderKey) -> Result<(), OrderError> {
    let number = key.number.as_str();
    if number.is_empty() || number.trim() != number || key.counter.trim().is_empty() {
        return Err(OrderError::InvalidNumber(key.number.clone()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderKey;
    type Create = OrderCreate;
    /// Orders change only through transitions and renames.
    type Update = Infallible;
    type Action = OrderTransition;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: &OrderKey, params: OrderCreate) -> Result<Self, Self::Error> {
        validate_key(id)?;
        Ok(Order::waiting(params.placed_at))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn on_rekey(&mut self, _from: &OrderKey, to: &OrderKey, _ctx: &()) -> Result<(), Self::Error> {
        if self.status != OrderStatus::Waiting {
            return Err(OrderError::NotEditable(self.status));
        }
        validate_key(to)
    }

    async fn handle_action(
        &mut self,
        transition: OrderTransition,
        _ctx: &(),
    ) -> Result<Order, Self::Error> {
        self.apply(transition)?;
        Ok(self.clone())
    }
}
