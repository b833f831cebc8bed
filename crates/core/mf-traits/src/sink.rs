//! Output sinks: where a stage hands its batch onward.

use mf_types::{Reading, ReadingSet};
use parking_lot::Mutex;
use std::sync::Arc;

/// Receives the batch a stage forwards.
///
/// Implemented for any `FnMut(ReadingSet)`, so a host can pass a closure.
pub trait OutputSink {
    /// Takes ownership of a forwarded batch.
    fn emit(&mut self, readings: ReadingSet);
}

impl<F> OutputSink for F
where
    F: FnMut(ReadingSet),
{
    fn emit(&mut self, readings: ReadingSet) {
        self(readings)
    }
}

/// Sink that keeps every batch it receives.
///
/// Clones share the same storage, so one clone can be handed to a stage
/// while another is used to inspect what arrived.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    batches: Arc<Mutex<Vec<ReadingSet>>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of batches received.
    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// Returns a copy of every batch received, in arrival order.
    pub fn batches(&self) -> Vec<ReadingSet> {
        self.batches.lock().clone()
    }

    /// Returns every reading received, flattened across batches.
    pub fn readings(&self) -> Vec<Reading> {
        self.batches
            .lock()
            .iter()
            .flat_map(|set| set.readings().iter().cloned())
            .collect()
    }
}

impl OutputSink for CollectingSink {
    fn emit(&mut self, readings: ReadingSet) {
        self.batches.lock().push(readings);
    }
}
