//! # Order Client
//!
//! The typed API every station uses to read and write orders. It checks that the
//! acting role may use the station, stamps times, normalizes order numbers and maps
//! framework errors back to [`OrderError`]. Whether a step is legal for the order's
//! current status is decided by the actor.
use crate::clock::{system_clock, Clock};
use crate::model::{Order, OrderCreate, OrderKey, OrderStatus, OrderTransition, Priority, Role, Station};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use keyed_actor::{ActorClient, Change, FrameworkError, ResourceClient, Selector, Versioned};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    clock: Clock,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self {
            inner,
            clock: system_clock(),
        }
    }

    /// Replaces the time source used for `placedAt` and `waitingSince`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn authorize(role: Role, station: Station) -> Result<(), OrderError> {
        if role.permits(station) {
            Ok(())
        } else {
            warn!(%role, ?station, "Rejected write from unauthorized role");
            Err(OrderError::Unauthorized { role, station })
        }
    }

    fn normalize(key: OrderKey) -> OrderKey {
        let number = key.number.trim().to_string();
        OrderKey::new(key.counter, number)
    }

    /// Counter: places a new `waiting` order. A number already in use is rejected
    /// without touching the existing order.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn place_order(&self, role: Role, key: OrderKey) -> Result<Versioned<Order>, OrderError> {
        Self::authorize(role, Station::Counter)?;
        let key = Self::normalize(key);
        let placed_at = (self.clock)();
        info!(placed_at, "Sending place_order to actor");
        self.inner
            .create(key, OrderCreate { placed_at })
            .await
            .map_err(Self::map_error)
    }

    /// Counter: moves a waiting order to a new number on the same counter.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn renumber(
        &self,
        role: Role,
        key: &OrderKey,
        new_number: &str,
        expected: Option<u64>,
    ) -> Result<Versioned<Order>, OrderError> {
        Self::authorize(role, Station::Counter)?;
        let to = key.with_number(new_number.trim());
        self.inner
            .rekey(key.clone(), to, expected)
            .await
            .map_err(Self::map_error)
    }

    /// Counter: deletes one order.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn remove(&self, role: Role, key: &OrderKey, expected: Option<u64>) -> Result<(), OrderError> {
        Self::authorize(role, Station::Counter)?;
        self.inner
            .delete(key.clone(), expected)
            .await
            .map_err(Self::map_error)
    }

    /// Counter: deletes every delivered order and returns their keys.
    #[instrument(skip(self))]
    pub async fn clear_delivered(&self, role: Role) -> Result<Vec<OrderKey>, OrderError> {
        Self::authorize(role, Station::Counter)?;
        let removed = self
            .inner
            .purge(Selector::new(|order: &Order| order.status == OrderStatus::Delivered))
            .await
            .map_err(Self::map_error)?;
        info!(removed = removed.len(), "Cleared delivered orders");
        Ok(removed)
    }

    async fn transition(
        &self,
        role: Role,
        station: Station,
        key: &OrderKey,
        expected: Option<u64>,
        transition: OrderTransition,
    ) -> Result<Versioned<Order>, OrderError> {
        Self::authorize(role, station)?;
        debug!(step = transition.name(), "Sending transition to actor");
        self.inner
            .perform_action(key.clone(), expected, transition)
            .await
            .map_err(Self::map_error)
    }

    /// Kitchen: `waiting → in_preparation`.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn accept(&self, role: Role, key: &OrderKey, expected: Option<u64>) -> Result<Versioned<Order>, OrderError> {
        self.transition(role, Station::Kitchen, key, expected, OrderTransition::Accept)
            .await
    }

    /// Kitchen: `in_preparation → ready`.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn mark_ready(
        &self,
        role: Role,
        key: &OrderKey,
        expected: Option<u64>,
    ) -> Result<Versioned<Order>, OrderError> {
        self.transition(role, Station::Kitchen, key, expected, OrderTransition::MarkReady)
            .await
    }

    /// Delivery: `ready | incomplete → delivered`.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn deliver(&self, role: Role, key: &OrderKey, expected: Option<u64>) -> Result<Versioned<Order>, OrderError> {
        self.transition(role, Station::Delivery, key, expected, OrderTransition::Deliver)
            .await
    }

    /// Delivery: sends an order back to the kitchen with a delay reason.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn requeue(
        &self,
        role: Role,
        key: &OrderKey,
        expected: Option<u64>,
        reason: &str,
        priority: Option<Priority>,
    ) -> Result<Versioned<Order>, OrderError> {
        let step = OrderTransition::Requeue {
            reason: reason.to_string(),
            priority,
            at: (self.clock)(),
        };
        self.transition(role, Station::Delivery, key, expected, step)
            .await
    }

    /// Delivery: records a partial delivery.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn mark_incomplete(
        &self,
        role: Role,
        key: &OrderKey,
        expected: Option<u64>,
        reason: &str,
    ) -> Result<Versioned<Order>, OrderError> {
        let step = OrderTransition::MarkIncomplete {
            reason: reason.to_string(),
        };
        self.transition(role, Station::Delivery, key, expected, step)
            .await
    }

    /// Customer status lookup. Only digits are accepted as an order number.
    #[instrument(skip(self))]
    pub async fn lookup(&self, counter: &str, number: &str) -> Result<Order, OrderError> {
        let number = number.trim();
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(OrderError::InvalidNumber(number.to_string()));
        }
        let key = OrderKey::new(counter, number);
        match self.get(key.clone()).await? {
            Some(found) => Ok(found.value),
            None => Err(OrderError::NotFound(key.to_string())),
        }
    }

    /// Every order of every counter, in key order.
    pub async fn snapshot(&self) -> Result<Vec<(OrderKey, Versioned<Order>)>, OrderError> {
        self.list().await
    }

    /// Change feed of all order writes committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Change<Order>> {
        self.inner.subscribe()
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::AlreadyExists(id) => OrderError::DuplicateNumber(id),
            FrameworkError::VersionConflict {
                expected, actual, ..
            } => OrderError::StaleVersion { expected, actual },
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
