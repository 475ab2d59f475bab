//! Display labels. The stored status tags never change; only these tables do.
use crate::model::OrderStatus;

/// Status tag on staff cards (kitchen, delivery).
pub fn staff_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Waiting => "Waiting",
        OrderStatus::InPreparation => "In Preparation",
        OrderStatus::Ready => "Ready",
        OrderStatus::Incomplete => "Partial Delivered",
        OrderStatus::Delivered => "Delivered",
    }
}

/// Short label on counter tiles.
pub fn counter_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Waiting => "WAITING",
        OrderStatus::InPreparation => "IN PREP",
        OrderStatus::Ready => "READY",
        OrderStatus::Incomplete => "INCOMPLETE",
        OrderStatus::Delivered => "DELIVERED",
    }
}

/// What a customer sees on the status lookup page.
pub fn customer_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Waiting => "IN PROGRESS",
        OrderStatus::InPreparation => "IN PREPARATION",
        OrderStatus::Ready => "READY",
        OrderStatus::Incomplete => "PARTIAL DELIVERED",
        OrderStatus::Delivered => "DELIVERED",
    }
}

/// Message shown when a status lookup finds nothing.
pub const NOT_FOUND: &str = "Order not found";
