//! Keeps a [`LiveView`] of orders current for a board: push events as they
//! arrive, plus a full re-read on a fixed interval.
use crate::clients::OrderClient;
use crate::model::{Order, OrderKey};
use crate::order_actor::OrderError;
use keyed_actor::{ActorClient, Change, LiveView, SnapshotDiff};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

/// Why a board should redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A pushed write moved something.
    Changed(SnapshotDiff<OrderKey>),
    /// The periodic re-read ran. The diff may be empty.
    Refreshed(SnapshotDiff<OrderKey>),
}

impl FeedEvent {
    pub fn diff(&self) -> &SnapshotDiff<OrderKey> {
        match self {
            FeedEvent::Changed(diff) | FeedEvent::Refreshed(diff) => diff,
        }
    }
}

/// A board's connection to the order actor.
///
/// The feed holds an [`OrderClient`], which keeps the order actor running. Drop
/// every `BoardFeed` before [`CanteenSystem::shutdown`](crate::lifecycle::CanteenSystem::shutdown),
/// or the shutdown waits for it.
pub struct BoardFeed {
    client: OrderClient,
    view: LiveView<Order>,
    changes: broadcast::Receiver<Change<Order>>,
    refresh: Interval,
}

impl BoardFeed {
    /// Subscribes, takes the first snapshot and arms the refresh timer. The first
    /// refresh fires one `period` from now.
    pub async fn open(client: OrderClient, period: Duration) -> Result<Self, OrderError> {
        let (view, changes) = LiveView::open(client.inner())
            .await
            .map_err(OrderClient::map_error)?;
        let mut refresh = interval_at(Instant::now() + period, period);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(orders = view.len(), "Board feed opened");
        Ok(Self {
            client,
            view,
            changes,
            refresh,
        })
    }

    pub fn view(&self) -> &LiveView<Order> {
        &self.view
    }

    /// Waits for the next push event or refresh tick, whichever comes first.
    ///
    /// Push events that leave the view unchanged (replays) are skipped. A
    /// subscriber that lagged behind the feed resyncs from a fresh snapshot.
    pub async fn next(&mut self) -> Result<FeedEvent, OrderError> {
        loop {
            tokio::select! {
                received = self.changes.recv() => match received {
                    Ok(change) => {
                        let diff = self.view.apply(change);
                        if !diff.is_empty() {
                            return Ok(FeedEvent::Changed(diff));
                        }
                    }
                    // The feed cannot close while `self.client` holds its sender, so
                    // only `Lagged` reaches this arm.
                    Err(error) => {
                        warn!(%error, "Board feed lagged, resyncing");
                        let diff = self.resync().await?;
                        return Ok(FeedEvent::Changed(diff));
                    }
                },
                _ = self.refresh.tick() => {
                    let diff = self.resync().await?;
                    debug!(added = diff.added.len(), removed = diff.removed.len(), changed = diff.changed.len(), "Board refreshed");
                    return Ok(FeedEvent::Refreshed(diff));
                }
            }
        }
    }

    async fn resync(&mut self) -> Result<SnapshotDiff<OrderKey>, OrderError> {
        self.view
            .refresh(self.client.inner())
            .await
            .map_err(OrderClient::map_error)
    }
}
