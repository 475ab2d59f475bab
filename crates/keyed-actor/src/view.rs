//! # Live Views
//!
//! A `LiveView<T>` is a client-side replica of an actor's collection: seeded from
//! `list()` and kept current by applying `Change<T>` events from the feed. Every
//! mutation of the view reports what moved as a [`SnapshotDiff`], which is what
//! boards use to re-render and to raise arrival alerts.
//!
//! Subscribe *before* taking the snapshot ([`LiveView::open`] does this). Events that
//! raced the snapshot are then replayed, and the version stamps make the replay a
//! no-op.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Change, Versioned};
use std::collections::BTreeMap;
use tokio::sync::broadcast;

/// Keys that appeared, disappeared or changed between two snapshots.
///
/// Each list is in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDiff<K> {
    pub added: Vec<K>,
    pub removed: Vec<K>,
    pub changed: Vec<K>,
}

impl<K> Default for SnapshotDiff<K> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            changed: Vec::new(),
        }
    }
}

impl<K: Ord + Clone> SnapshotDiff<K> {
    /// Pure diff of two keyed snapshots. A key present in both is `changed` when its
    /// values differ.
    pub fn between<V: PartialEq>(old: &BTreeMap<K, V>, new: &BTreeMap<K, V>) -> Self {
        let mut diff = Self::default();
        for (key, value) in new {
            match old.get(key) {
                None => diff.added.push(key.clone()),
                Some(previous) if previous != value => diff.changed.push(key.clone()),
                Some(_) => {}
            }
        }
        diff.removed = old
            .keys()
            .filter(|key| !new.contains_key(*key))
            .cloned()
            .collect();
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Folds a later diff into this one.
    pub fn merge(&mut self, later: SnapshotDiff<K>) {
        for key in later.removed {
            if let Some(pos) = self.added.iter().position(|k| *k == key) {
                self.added.remove(pos);
            } else {
                self.changed.retain(|k| *k != key);
                push_unique(&mut self.removed, key);
            }
        }
        for key in later.added {
            if let Some(pos) = self.removed.iter().position(|k| *k == key) {
                self.removed.remove(pos);
                push_unique(&mut self.changed, key);
            } else {
                push_unique(&mut self.added, key);
            }
        }
        for key in later.changed {
            if !self.added.contains(&key) {
                push_unique(&mut self.changed, key);
            }
        }
        self.added.sort();
        self.removed.sort();
        self.changed.sort();
    }
}

fn push_unique<K: PartialEq>(keys: &mut Vec<K>, key: K) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

/// Client-side replica of a keyed collection.
#[derive(Debug, Clone)]
pub struct LiveView<T: ActorEntity> {
    records: BTreeMap<T::Id, Versioned<T>>,
}

impl<T: ActorEntity> Default for LiveView<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<T: ActorEntity> LiveView<T> {
    pub fn from_snapshot(snapshot: Vec<(T::Id, Versioned<T>)>) -> Self {
        Self {
            records: snapshot.into_iter().collect(),
        }
    }

    /// Subscribes to the client's feed, then seeds the view from a full snapshot.
    pub async fn open(
        client: &ResourceClient<T>,
    ) -> Result<(Self, broadcast::Receiver<Change<T>>), FrameworkError> {
        let feed = client.subscribe();
        let snapshot = client.list().await?;
        Ok((Self::from_snapshot(snapshot), feed))
    }

    /// Applies one feed event. Events older than what the view holds are ignored.
    pub fn apply(&mut self, change: Change<T>) -> SnapshotDiff<T::Id> {
        let mut diff = SnapshotDiff::default();
        match change {
            Change::Created { id, record } | Change::Updated { id, record } => {
                self.upsert(id, record, &mut diff);
            }
            Change::Rekeyed { from, to, record } => {
                let moved = self
                    .records
                    .get(&from)
                    .is_some_and(|held| held.version < record.version);
                if moved {
                    self.records.remove(&from);
                    diff.removed.push(from);
                }
                self.upsert(to, record, &mut diff);
            }
            Change::Removed { id, version } => {
                let gone = self
                    .records
                    .get(&id)
                    .is_some_and(|held| held.version <= version);
                if gone {
                    self.records.remove(&id);
                    diff.removed.push(id);
                }
            }
        }
        diff
    }

    fn upsert(&mut self, id: T::Id, record: Versioned<T>, diff: &mut SnapshotDiff<T::Id>) {
        match self.records.get(&id) {
            Some(held) if held.version >= record.version => {}
            Some(_) => {
                diff.changed.push(id.clone());
                self.records.insert(id, record);
            }
            None => {
                diff.added.push(id.clone());
                self.records.insert(id, record);
            }
        }
    }

    /// Replaces the view with a fresh snapshot, reporting the difference by version.
    pub fn resync(&mut self, snapshot: Vec<(T::Id, Versioned<T>)>) -> SnapshotDiff<T::Id> {
        let fresh: BTreeMap<T::Id, Versioned<T>> = snapshot.into_iter().collect();
        let diff = SnapshotDiff::between(&versions(&self.records), &versions(&fresh));
        self.records = fresh;
        diff
    }

    /// Re-reads the whole collection through `client` and resyncs.
    pub async fn refresh(
        &mut self,
        client: &ResourceClient<T>,
    ) -> Result<SnapshotDiff<T::Id>, FrameworkError> {
        let snapshot = client.list().await?;
        Ok(self.resync(snapshot))
    }

    pub fn get(&self, id: &T::Id) -> Option<&Versioned<T>> {
        self.records.get(id)
    }

    pub fn records(&self) -> &BTreeMap<T::Id, Versioned<T>> {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T::Id, &Versioned<T>)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn versions<K: Ord + Clone, T>(records: &BTreeMap<K, Versioned<T>>) -> BTreeMap<K, u64> {
    records
        .iter()
        .map(|(id, record)| (id.clone(), record.version))
        .collect()
}
