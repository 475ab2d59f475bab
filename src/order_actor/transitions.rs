//! The order state machine.
//!
//! | From | Step | To | Side effects |
//! |---|---|---|---|
//! | waiting | `Accept` | in_preparation | |
//! | in_preparation | `MarkReady` | ready | clears comment, priority, placedAt |
//! | ready, incomplete | `Deliver` | delivered | clears comment, priority, waitingSince |
//! | in_preparation, ready, incomplete, delivered | `Requeue` | waiting | sets comment, priority, waitingSince; clears reason |
//! | any but delivered | `MarkIncomplete` | incomplete | sets reason |
//!
//! Anything else is [`OrderError::InvalidTransition`] and leaves the order untouched.

use crate::model::{Order, OrderStatus, OrderTransition};
use crate::order_actor::OrderError;

impl Order {
    /// Applies one lifecycle step in place.
    pub fn apply(&mut self, transition: OrderTransition) -> Result<(), OrderError> {
        use OrderStatus::*;

        let invalid = |from: OrderStatus, t: &OrderTransition| OrderError::InvalidTransition {
            from,
            transition: t.name(),
        };

        match (self.status, transition) {
            (Waiting, OrderTransition::Accept) => {
                self.status = InPreparation;
            }
            (InPreparation, OrderTransition::MarkReady) => {
                self.status = Ready;
                self.comment = None;
                self.priority = None;
                self.placed_at = None;
            }
            (Ready | Incomplete, OrderTransition::Deliver) => {
                self.status = Delivered;
                self.comment = None;
                self.priority = None;
                self.waiting_since = None;
            }
            (
                InPreparation | Ready | Incomplete | Delivered,
                OrderTransition::Requeue {
                    reason,
                    priority,
                    at,
                },
            ) => {
                let reason = reason.trim();
                if reason.is_empty() {
                    return Err(OrderError::MissingReason);
                }
                self.status = Waiting;
                self.comment = Some(reason.to_string());
                self.priority = priority;
                self.waiting_since = Some(at);
                self.reason = None;
            }
            (from, OrderTransition::MarkIncomplete { reason }) if from != Delivered => {
                self.status = Incomplete;
                self.reason = Some(reason.trim().to_string());
            }
            (from, other) => return Err(invalid(from, &other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    const T0: i64 = 1_700_000_000_000;

    fn requeue(reason: &str) -> OrderTransition {
        OrderTransition::Requeue {
            reason: reason.into(),
            priority: Some(Priority::High),
            at: T0 + 60_000,
        }
    }

    fn order_in(status: OrderStatus) -> Order {
        Order {
            status,
            ..Order::waiting(T0)
        }
    }

    #[test]
    fn test_happy_path_to_delivered() {
        let mut order = Order::waiting(T0);
        order.apply(OrderTransition::Accept).unwrap();
        assert_eq!(order.status, OrderStatus::InPreparation);
        assert_eq!(order.placed_at, Some(T0));

        order.apply(OrderTransition::MarkReady).unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
        assert_eq!(order.placed_at, None);

        order.apply(OrderTransition::Deliver).unwrap();
        assert_eq!(order.to_json().unwrap(), r#"{"status":"delivered"}"#);
    }

    #[test]
    fn test_mark_ready_clears_comment_priority_and_placed_at() {
        let mut order = Order::waiting(T0);
        order.apply(OrderTransition::Accept).unwrap();
        order.comment = Some("no onions".into());
        order.priority = Some(Priority::Low);

        order.apply(OrderTransition::MarkReady).unwrap();
        assert_eq!(order.comment, None);
        assert_eq!(order.priority, None);
        assert_eq!(order.placed_at, None);
    }

    #[test]
    fn test_requeue_from_ready_sets_delay_fields() {
        let mut order = order_in(OrderStatus::Ready);
        order.placed_at = None;

        order.apply(requeue("Kitchen backlog")).unwrap();
        assert_eq!(order.status, OrderStatus::Waiting);
        assert_eq!(order.comment.as_deref(), Some("Kitchen backlog"));
        assert_eq!(order.priority, Some(Priority::High));
        assert_eq!(order.waiting_since, Some(T0 + 60_000));
    }

    #[test]
    fn test_requeue_needs_reason_and_leaves_order_untouched() {
        let mut order = order_in(OrderStatus::Ready);
        let before = order.clone();
        assert_eq!(order.apply(requeue("   ")), Err(OrderError::MissingReason));
        assert_eq!(order, before);
    }

    #[test]
    fn test_requeue_from_waiting_is_rejected() {
        let mut order = Order::waiting(T0);
        assert_eq!(
            order.apply(requeue("late")),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Waiting,
                transition: "requeue"
            })
        );
    }

    #[test]
    fn test_deliver_clears_waiting_since() {
        let mut order = order_in(OrderStatus::Ready);
        order.waiting_since = Some(T0);
        order.comment = Some("x".into());
        order.apply(OrderTransition::Deliver).unwrap();
        assert_eq!(order.waiting_since, None);
        assert_eq!(order.comment, None);
    }

    #[test]
    fn test_incomplete_from_any_open_status() {
        for status in [
            OrderStatus::Waiting,
            OrderStatus::InPreparation,
            OrderStatus::Ready,
            OrderStatus::Incomplete,
        ] {
            let mut order = order_in(status);
            order
                .apply(OrderTransition::MarkIncomplete {
                    reason: " Missing drink ".into(),
                })
                .unwrap();
            assert_eq!(order.status, OrderStatus::Incomplete);
            assert_eq!(order.reason.as_deref(), Some("Missing drink"));
        }

        let mut delivered = order_in(OrderStatus::Delivered);
        assert!(delivered
            .apply(OrderTransition::MarkIncomplete { reason: "x".into() })
            .is_err());
    }

    #[test]
    fn test_incomplete_can_be_finished_or_requeued() {
        let mut finished = order_in(OrderStatus::Incomplete);
        finished.reason = Some("Missing drink".into());
        finished.apply(OrderTransition::Deliver).unwrap();
        assert_eq!(finished.status, OrderStatus::Delivered);
        assert_eq!(finished.reason.as_deref(), Some("Missing drink"));

        let mut requeued = order_in(OrderStatus::Incomplete);
        requeued.reason = Some("Missing drink".into());
        requeued.apply(requeue("Redo the drink")).unwrap();
        assert_eq!(requeued.status, OrderStatus::Waiting);
        assert_eq!(requeued.reason, None);
    }

    #[test]
    fn test_kitchen_steps_only_from_their_source_status() {
        let mut ready = order_in(OrderStatus::Ready);
        assert!(ready.apply(OrderTransition::Accept).is_err());
        let mut waiting = Order::waiting(T0);
        assert!(waiting.apply(OrderTransition::MarkReady).is_err());
        assert!(waiting.apply(OrderTransition::Deliver).is_err());
        assert_eq!(waiting, Order::waiting(T0));
    }
}
