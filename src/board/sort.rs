//! Board ordering: by status rank, then by how long the order has been waiting,
//! then by order number.
use crate::model::{Order, OrderKey, OrderStatus};
use std::cmp::Ordering;

/// `waiting < in_preparation < ready < delivered`; partial deliveries sort last.
pub fn rank(status: OrderStatus) -> u8 {
    match status {
        OrderStatus::Waiting => 1,
        OrderStatus::InPreparation => 2,
        OrderStatus::Ready => 3,
        OrderStatus::Delivered => 4,
        OrderStatus::Incomplete => 5,
    }
}

/// Numeric comparison when both numbers are integers, text otherwise. Integers
/// sort before anything else.
pub fn compare_numbers(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

pub fn compare(a_key: &OrderKey, a: &Order, b_key: &OrderKey, b: &Order) -> Ordering {
    rank(a.status)
        .cmp(&rank(b.status))
        .then_with(|| a.waiting_since.unwrap_or(0).cmp(&b.waiting_since.unwrap_or(0)))
        .then_with(|| compare_numbers(&a_key.number, &b_key.number))
        .then_with(|| a_key.counter.cmp(&b_key.counter))
}

pub fn sort_by_board_order(entries: &mut [(&OrderKey, &Order)]) {
    entries.sort_by(|(a_key, a), (b_key, b)| compare(a_key, a, b_key, b));
}
