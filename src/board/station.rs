//! Staff boards. Each one is a pure projection of a [`LiveView`] of orders at
//! `now`, filtered to one counter.
use super::arrivals::ArrivalTracker;
use super::presentation::{counter_label, staff_label};
use super::sort;
use super::urgency::{elapsed_minutes, relative_label, Thresholds, Urgency};
use crate::model::{Order, OrderKey, OrderStatus};
use keyed_actor::{LiveView, Versioned};

/// One order as a staff board shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub key: OrderKey,
    /// Version to send back with the next command for this order.
    pub version: u64,
    pub status: OrderStatus,
    pub tag: Option<&'static str>,
    pub comment: Option<String>,
    /// Upper-cased for display.
    pub priority: Option<String>,
    pub reason: Option<String>,
    pub minutes: i64,
    pub urgency: Urgency,
    pub time_label: Option<String>,
    /// Whether tapping the card opens an action.
    pub actionable: bool,
}

impl Card {
    fn base(key: &OrderKey, record: &Versioned<Order>, now: i64, thresholds: Thresholds) -> Self {
        let order = &record.value;
        let minutes = elapsed_minutes(order.since(), now);
        Self {
            key: key.clone(),
            version: record.version,
            status: order.status,
            tag: None,
            comment: order.comment.clone(),
            priority: order.priority.map(|p| p.as_str().to_uppercase()),
            reason: order.reason.clone(),
            minutes,
            urgency: thresholds.classify(minutes),
            time_label: None,
            actionable: false,
        }
    }
}

/// Orders of `counter` in board order, optionally restricted to one status.
fn counter_orders<'a>(
    view: &'a LiveView<Order>,
    counter: &str,
    filter: Option<OrderStatus>,
) -> Vec<(&'a OrderKey, &'a Versioned<Order>)> {
    let mut orders: Vec<_> = view
        .iter()
        .filter(|(key, _)| key.counter == counter)
        .filter(|(_, record)| filter.is_none_or(|status| record.value.status == status))
        .collect();
    orders.sort_by(|(a_key, a), (b_key, b)| sort::compare(a_key, &a.value, b_key, &b.value));
    orders
}

/// What the kitchen sees after one render.
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenFrame {
    pub cards: Vec<Card>,
    /// Orders that entered `waiting` since the previous render. Non-empty means
    /// the alert sounds.
    pub new_waiting: Vec<OrderKey>,
}

#[derive(Debug, Clone)]
pub struct KitchenBoard {
    counter: String,
    filter: Option<OrderStatus>,
    waiting: ArrivalTracker<OrderKey>,
}

impl KitchenBoard {
    pub fn new(counter: impl Into<String>) -> Self {
        Self {
            counter: counter.into(),
            filter: None,
            waiting: ArrivalTracker::new(),
        }
    }

    /// `None` shows every status.
    pub fn set_filter(&mut self, filter: Option<OrderStatus>) {
        self.filter = filter;
    }

    pub fn render(&mut self, view: &LiveView<Order>, now: i64) -> KitchenFrame {
        let waiting = view
            .iter()
            .filter(|(key, record)| key.counter == self.counter && record.value.status == OrderStatus::Waiting)
            .map(|(key, _)| key.clone());
        let new_waiting = self.waiting.observe(waiting);

        let cards = counter_orders(view, &self.counter, self.filter)
            .into_iter()
            .map(|(key, record)| {
                let mut card = Card::base(key, record, now, Thresholds::DELIVERY_BOARD);
                if record.value.status == OrderStatus::InPreparation {
                    card.tag = Some("IN PREPARATION");
                }
                card.time_label = relative_label(record.value.since(), now);
                card.actionable = record.value.status != OrderStatus::Delivered;
                card
            })
            .collect();

        KitchenFrame { cards, new_waiting }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryFrame {
    /// Ready, waiting and partially delivered orders.
    pub active: Vec<Card>,
    pub delivered: Vec<Card>,
    pub ready_count: usize,
    pub incomplete_count: usize,
}

#[derive(Debug, Clone)]
pub struct DeliveryBoard {
    counter: String,
}

impl DeliveryBoard {
    pub fn new(counter: impl Into<String>) -> Self {
        Self {
            counter: counter.into(),
        }
    }

    pub fn render(&self, view: &LiveView<Order>, now: i64) -> DeliveryFrame {
        let mut frame = DeliveryFrame {
            active: Vec::new(),
            delivered: Vec::new(),
            ready_count: 0,
            incomplete_count: 0,
        };
        for (key, record) in counter_orders(view, &self.counter, None) {
            let status = record.value.status;
            let mut card = Card::base(key, record, now, Thresholds::DELIVERY_BOARD);
            card.tag = Some(staff_label(status));
            match status {
                OrderStatus::Ready => {
                    frame.ready_count += 1;
                    card.time_label = Some(format!("Ready {} min", card.minutes));
                }
                OrderStatus::Waiting => {
                    card.time_label = Some(format!("Waiting {} min", card.minutes));
                }
                OrderStatus::Incomplete => {
                    frame.incomplete_count += 1;
                    card.time_label = Some(format!("Incomplete {} min", card.minutes));
                }
                OrderStatus::Delivered => {
                    frame.delivered.push(card);
                    continue;
                }
                OrderStatus::InPreparation => continue,
            }
            card.actionable = true;
            frame.active.push(card);
        }
        frame
    }
}

#[derive(Debug, Clone)]
pub struct CounterBoard {
    counter: String,
    filter: Option<OrderStatus>,
}

impl CounterBoard {
    pub fn new(counter: impl Into<String>) -> Self {
        Self {
            counter: counter.into(),
            filter: None,
        }
    }

    pub fn set_filter(&mut self, filter: Option<OrderStatus>) {
        self.filter = filter;
    }

    /// Counter tiles. Only waiting orders can still be renumbered.
    pub fn render(&self, view: &LiveView<Order>, now: i64) -> Vec<Card> {
        counter_orders(view, &self.counter, self.filter)
            .into_iter()
            .map(|(key, record)| {
                let mut card = Card::base(key, record, now, Thresholds::DELIVERY_BOARD);
                card.tag = Some(counter_label(record.value.status));
                card.actionable = record.value.status == OrderStatus::Waiting;
                card
            })
            .collect()
    }
}
