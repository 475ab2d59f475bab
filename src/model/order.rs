//! The order record as stored under `orders/<counter>/<number>`.
//!
//! # Actor Framework
//! [`Order`] implements [`ActorEntity`](keyed_actor::ActorEntity) (see
//! [`crate::order_actor`]), keyed by [`OrderKey`].
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only counter the dashboards write to in practice.
pub const DEFAULT_COUNTER: &str = "Food Canteen";

/// Store key of an order: unique per counter at any instant.
///
/// Ordering is by counter, then by the raw number string. Boards re-sort
/// numerically; this order only makes snapshots deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderKey {
    pub counter: String,
    pub number: String,
}

impl OrderKey {
    pub fn new(counter: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            counter: counter.into(),
            number: number.into(),
        }
    }

    /// Shorthand for a key on [`DEFAULT_COUNTER`].
    pub fn canteen(number: impl Into<String>) -> Self {
        Self::new(DEFAULT_COUNTER, number)
    }

    /// Path of the record in the key-value layout.
    pub fn path(&self) -> String {
        format!("orders/{}/{}", self.counter, self.number)
    }

    /// Same order number on another counter, or a new number on this one.
    pub fn with_number(&self, number: impl Into<String>) -> Self {
        Self::new(self.counter.clone(), number)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.counter, self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Waiting,
    InPreparation,
    Ready,
    Incomplete,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Waiting,
        OrderStatus::InPreparation,
        OrderStatus::Ready,
        OrderStatus::Incomplete,
        OrderStatus::Delivered,
    ];

    /// Stored tag, as it appears in the record.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Waiting => "waiting",
            OrderStatus::InPreparation => "in_preparation",
            OrderStatus::Ready => "ready",
            OrderStatus::Incomplete => "incomplete",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delay priority chosen when delivery sends an order back to the kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One order. Absent optional fields are omitted from the JSON form.
///
/// Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_since: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Order {
    /// A freshly placed order.
    pub fn waiting(placed_at: i64) -> Self {
        Self {
            status: OrderStatus::Waiting,
            placed_at: Some(placed_at),
            waiting_since: None,
            comment: None,
            priority: None,
            reason: None,
        }
    }

    /// The instant the current wait started: a re-queue time if there is one,
    /// otherwise the placement time.
    pub fn since(&self) -> Option<i64> {
        self.waiting_since.or(self.placed_at)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub placed_at: i64,
}

/// A lifecycle step requested by the kitchen or the delivery desk.
///
/// Steps that record a time carry it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderTransition {
    /// Kitchen starts preparing a waiting order.
    Accept,
    /// Kitchen finished preparing.
    MarkReady,
    /// Handed to the customer.
    Deliver,
    /// Sent back to the kitchen with a delay reason.
    Requeue {
        reason: String,
        priority: Option<Priority>,
        at: i64,
    },
    /// Partially delivered.
    MarkIncomplete { reason: String },
}

impl OrderTransition {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            OrderTransition::Accept => "accept",
            OrderTransition::MarkReady => "mark_ready",
            OrderTransition::Deliver => "deliver",
            OrderTransition::Requeue { .. } => "requeue",
            OrderTransition::MarkIncomplete { .. } => "mark_incomplete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_order_json_omits_absent_fields() {
        let json = Order::waiting(1_700_000_000_000).to_json().unwrap();
        assert_eq!(json, r#"{"status":"waiting","placedAt":1700000000000}"#);
    }

    #[test]
    fn test_requeued_order_json_shape() {
        let order = Order {
            status: OrderStatus::Waiting,
            placed_at: None,
            waiting_since: Some(42),
            comment: Some("Kitchen backlog".into()),
            priority: Some(Priority::High),
            reason: None,
        };
        let value: serde_json::Value = serde_json::from_str(&order.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "status": "waiting",
                "waitingSince": 42,
                "comment": "Kitchen backlog",
                "priority": "high"
            })
        );
    }

    #[test]
    fn test_reads_record_written_by_other_clients() {
        let order = Order::from_json(r#"{"status":"in_preparation","placedAt":5}"#).unwrap();
        assert_eq!(order.status, OrderStatus::InPreparation);
        assert_eq!(order.since(), Some(5));
        assert!(Order::from_json(r#"{"status":"lost"}"#).is_err());
    }

    #[test]
    fn test_key_path_and_display() {
        let key = OrderKey::canteen("12");
        assert_eq!(key.path(), "orders/Food Canteen/12");
        assert_eq!(key.to_string(), "Food Canteen/12");
        assert_eq!(key.with_number("13").number, "13");
    }
}
