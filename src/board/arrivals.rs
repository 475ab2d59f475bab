//! New-arrival detection for audible alerts.
use std::collections::BTreeSet;

/// Remembers the last list of ids seen in one bucket (e.g. "ready") and reports
/// the ids that were not in it.
///
/// An id that leaves the bucket and comes back is a new arrival again.
#[derive(Debug, Clone)]
pub struct ArrivalTracker<K> {
    last: BTreeSet<K>,
}

impl<K: Ord + Clone> Default for ArrivalTracker<K> {
    fn default() -> Self {
        Self {
            last: BTreeSet::new(),
        }
    }
}

impl<K: Ord + Clone> ArrivalTracker<K> {
    /// A tracker whose first observation reports everything present.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker that treats `current` as already announced.
    pub fn primed(current: impl IntoIterator<Item = K>) -> Self {
        Self {
            last: current.into_iter().collect(),
        }
    }

    /// Replaces the remembered list with `current` and returns the newcomers in key order.
    pub fn observe(&mut self, current: impl IntoIterator<Item = K>) -> Vec<K> {
        let current: BTreeSet<K> = current.into_iter().collect();
        let arrived = current.difference(&self.last).cloned().collect();
        self.last = current;
        arrived
    }
}
