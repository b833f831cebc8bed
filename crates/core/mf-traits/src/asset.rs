//! Asset tracking: which assets flowed through which stage.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;

/// Event name recorded for filter stages.
pub const FILTER_EVENT: &str = "Filter";

/// One (stage, asset, event) observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AssetTrackingTuple {
    /// Configuration category (or service) name of the stage
    pub category: String,

    /// Asset name of the reading
    pub asset: String,

    /// Event kind, e.g. [`FILTER_EVENT`]
    pub event: String,
}

impl AssetTrackingTuple {
    /// Creates a tuple.
    pub fn new(
        category: impl Into<String>,
        asset: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            asset: asset.into(),
            event: event.into(),
        }
    }
}

/// Host collaborator that records asset tracking tuples.
///
/// Implementations must not block the caller for long and must not fail:
/// tracking is an observability side channel of the enrichment path.
pub trait AssetTracker: Send + Sync {
    /// Records an observation.
    fn track(&self, tuple: AssetTrackingTuple);
}

/// Tracker that keeps distinct tuples in memory.
#[derive(Debug, Default)]
pub struct InMemoryAssetTracker {
    tuples: Mutex<HashSet<AssetTrackingTuple>>,
    observations: Mutex<u64>,
}

impl InMemoryAssetTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the tuple has been recorded.
    pub fn contains(&self, tuple: &AssetTrackingTuple) -> bool {
        self.tuples.lock().contains(tuple)
    }

    /// Returns the distinct tuples recorded, sorted.
    pub fn tuples(&self) -> Vec<AssetTrackingTuple> {
        let mut tuples: Vec<_> = self.tuples.lock().iter().cloned().collect();
        tuples.sort_by(|a, b| {
            (&a.category, &a.asset, &a.event).cmp(&(&b.category, &b.asset, &b.event))
        });
        tuples
    }

    /// Returns the number of distinct tuples.
    pub fn len(&self) -> usize {
        self.tuples.lock().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.tuples.lock().is_empty()
    }

    /// Returns the number of `track` calls, duplicates included.
    pub fn observations(&self) -> u64 {
        *self.observations.lock()
    }
}

impl AssetTracker for InMemoryAssetTracker {
    fn track(&self, tuple: AssetTrackingTuple) {
        *self.observations.lock() += 1;
        self.tuples.lock().insert(tuple);
    }
}
