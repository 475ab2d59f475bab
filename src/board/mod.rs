//! # Boards
//!
//! Read-side projections of the order collection for each station and for the
//! public TV screen. Boards never write; they render a [`keyed_actor::LiveView`]
//! kept current by a [`BoardFeed`].
pub mod arrivals;
pub mod feed;
pub mod presentation;
pub mod sort;
pub mod station;
pub mod tv;
pub mod urgency;

pub use arrivals::ArrivalTracker;
pub use feed::{BoardFeed, FeedEvent};
pub use presentation::{counter_label, customer_label, staff_label, NOT_FOUND};
pub use station::{Card, CounterBoard, DeliveryBoard, DeliveryFrame, KitchenBoard, KitchenFrame};
pub use tv::{Lane, Tile, TvBoard, TvFrame};
pub use urgency::{Thresholds, Urgency};
