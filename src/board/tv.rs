//! The public TV board: every counter, three lanes, chimes for arrivals.
use super::arrivals::ArrivalTracker;
use super::sort::compare_numbers;
use super::urgency::{elapsed_minutes, Thresholds, Urgency};
use crate::model::{Order, OrderKey, OrderStatus};
use keyed_actor::LiveView;

/// A lane scrolls once it holds more tiles than this.
pub const READY_SCROLL_AFTER: usize = 20;
pub const WAITING_SCROLL_AFTER: usize = 6;
pub const INCOMPLETE_SCROLL_AFTER: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub key: OrderKey,
    pub minutes: i64,
    pub urgency: Urgency,
    /// First render in which this tile is in its lane.
    pub just_appeared: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lane {
    pub tiles: Vec<Tile>,
    pub scrolls: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TvFrame {
    pub ready: Lane,
    pub waiting: Lane,
    pub incomplete: Lane,
    /// Some order entered `ready` since the previous render.
    pub ready_chime: bool,
    /// Some order entered `waiting` since the previous render.
    pub waiting_chime: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TvBoard {
    ready: ArrivalTracker<OrderKey>,
    waiting: ArrivalTracker<OrderKey>,
}

impl TvBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &LiveView<Order>, now: i64) -> TvFrame {
        let mut ready = lane(view, OrderStatus::Ready, now);
        let mut waiting = lane(view, OrderStatus::Waiting, now);
        let mut incomplete = lane(view, OrderStatus::Incomplete, now);

        let new_ready = self.ready.observe(ready.tiles.iter().map(|t| t.key.clone()));
        let new_waiting = self.waiting.observe(waiting.tiles.iter().map(|t| t.key.clone()));
        for tile in ready.tiles.iter_mut() {
            tile.just_appeared = new_ready.contains(&tile.key);
        }
        for tile in waiting.tiles.iter_mut() {
            tile.just_appeared = new_waiting.contains(&tile.key);
        }

        ready.scrolls = ready.tiles.len() > READY_SCROLL_AFTER;
        waiting.scrolls = waiting.tiles.len() > WAITING_SCROLL_AFTER;
        incomplete.scrolls = incomplete.tiles.len() > INCOMPLETE_SCROLL_AFTER;

        TvFrame {
            ready,
            waiting,
            incomplete,
            ready_chime: !new_ready.is_empty(),
            waiting_chime: !new_waiting.is_empty(),
        }
    }
}

fn lane(view: &LiveView<Order>, status: OrderStatus, now: i64) -> Lane {
    let mut tiles: Vec<Tile> = view
        .iter()
        .filter(|(_, record)| record.value.status == status)
        .map(|(key, record)| {
            let minutes = elapsed_minutes(record.value.since(), now);
            Tile {
                key: key.clone(),
                minutes,
                urgency: Thresholds::TV_BOARD.classify(minutes),
                just_appeared: false,
            }
        })
        .collect();
    tiles.sort_by(|a, b| {
        compare_numbers(&a.key.number, &b.key.number).then_with(|| a.key.counter.cmp(&b.key.counter))
    });
    Lane {
        tiles,
        scrolls: false,
    }
}
