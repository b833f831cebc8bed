//! Filter stage trait for reading processing.

use mf_types::{FilterConfig, ReadingSet};

/// Lifecycle of a filter stage as driven by a host pipeline.
///
/// A stage is created once per pipeline attachment, receives batches through
/// [`FilterStage::ingest`] and forwards them onward. All calls take
/// `&mut self`: the host owns the stage and never calls it re-entrantly.
///
/// # Contract
///
/// - `ingest` forwards the batch it was given exactly once, even when the
///   stage does nothing to it.
/// - `reconfigure` replaces the stage's behaviour wholesale; nothing from the
///   previous configuration survives.
/// - `shutdown` releases everything the stage built from its configuration.
pub trait FilterStage {
    /// Processes a batch and forwards it to the stage's sink.
    fn ingest(&mut self, readings: ReadingSet);

    /// Applies new host options.
    fn reconfigure(&mut self, config: &FilterConfig);

    /// Releases the stage's state. The stage passes batches through afterwards.
    fn shutdown(&mut self);

    /// Returns the name of this stage for logging.
    fn name(&self) -> &str {
        "filter"
    }
}
