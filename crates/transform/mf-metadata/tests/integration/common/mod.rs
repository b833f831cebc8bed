//! Common utilities for integration tests.

use chrono::{TimeZone, Utc};
use mf_metadata::MetadataFilter;
use mf_traits::{CollectingSink, InMemoryAssetTracker};
use mf_types::{Datapoint, FilterConfig, Reading, ReadingSet};
use std::sync::Arc;

/// A filter wired to a collecting sink and an in-memory tracker.
pub struct TestContext {
    pub filter: MetadataFilter<CollectingSink>,
    pub sink: CollectingSink,
    pub tracker: Arc<InMemoryAssetTracker>,
}

impl TestContext {
    /// Builds a context from host options given as JSON text.
    pub fn from_host_json(category: &str, host: &str) -> Self {
        let config = FilterConfig::from_json(host).unwrap();
        Self::new(category, &config)
    }

    /// Builds a context from host options.
    pub fn new(category: &str, config: &FilterConfig) -> Self {
        let sink = CollectingSink::new();
        let tracker = Arc::new(InMemoryAssetTracker::new());
        let filter =
            MetadataFilter::new(category, config, sink.clone()).with_asset_tracker(tracker.clone());
        Self {
            filter,
            sink,
            tracker,
        }
    }
}

/// A reading with a single integer datapoint, timestamped deterministically.
pub fn reading(asset: &str, name: &str, value: i64) -> Reading {
    Reading::with_datapoint(asset, Datapoint::new(name, value))
        .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

/// A batch of `count` readings for `asset`, each carrying `num = index`.
pub fn numbered_batch(asset: &str, count: usize) -> ReadingSet {
    (0..count)
        .map(|i| reading(asset, "num", i as i64))
        .collect::<Vec<_>>()
        .into()
}
