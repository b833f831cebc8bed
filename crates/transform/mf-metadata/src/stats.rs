//! Counters kept by the metadata filter.

use serde::{Deserialize, Serialize};

/// Running totals for one filter instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Batches that were enriched
    pub batches_enriched: u64,

    /// Batches forwarded untouched because the filter was disabled
    pub batches_passed_through: u64,

    /// Readings that received metadata
    pub readings_enriched: u64,

    /// Datapoints appended across all readings
    pub datapoints_added: u64,

    /// Number of reconfigurations applied
    pub reconfigurations: u64,
}

impl FilterStats {
    pub(crate) fn record_enriched(&mut self, readings: usize, datapoints: usize) {
        self.batches_enriched += 1;
        self.readings_enriched += readings as u64;
        self.datapoints_added += datapoints as u64;
    }

    pub(crate) fn record_passthrough(&mut self) {
        self.batches_passed_through += 1;
    }

    pub(crate) fn record_reconfigure(&mut self) {
        self.reconfigurations += 1;
    }

    /// Returns the total number of batches seen.
    pub fn batches(&self) -> u64 {
        self.batches_enriched + self.batches_passed_through
    }
}
