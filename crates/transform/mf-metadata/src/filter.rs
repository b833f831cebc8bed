//! MetadataFilter - the enrichment stage itself.

use crate::compiler::{compile_config, FieldList};
use crate::descriptor::FILTER_NAME;
use crate::stats::FilterStats;
use mf_traits::{AssetTracker, AssetTrackingTuple, FilterStage, OutputSink, FILTER_EVENT};
use mf_types::{FilterConfig, ReadingSet};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Filter stage that appends configured metadata to every reading.
///
/// Implements the [`FilterStage`] trait. The stage is either enabled, in
/// which case each reading receives a fresh copy of every compiled field,
/// or disabled, in which case batches are forwarded untouched. Every
/// ingested batch is forwarded to the sink exactly once.
pub struct MetadataFilter<S> {
    /// Configuration category name, reported to asset tracking.
    category: String,

    /// Administrative state.
    enabled: bool,

    /// Compiled metadata fields, replaced wholesale on reconfigure.
    fields: FieldList,

    /// Where batches go next.
    sink: S,

    /// Optional asset tracking collaborator.
    tracker: Option<Arc<dyn AssetTracker>>,

    stats: FilterStats,
}

impl<S> std::fmt::Debug for MetadataFilter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataFilter")
            .field("category", &self.category)
            .field("enabled", &self.enabled)
            .field("fields", &self.fields.len())
            .field("tracker", &self.tracker.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: OutputSink> MetadataFilter<S> {
    /// Creates the filter and compiles its initial field list.
    ///
    /// # Arguments
    ///
    /// * `category` - Configuration category name of this instance
    /// * `config` - Host options (`enable`, `config`)
    /// * `sink` - Receives every batch after processing
    ///
    /// An absent or malformed metadata document is logged and leaves the
    /// field list empty; construction itself never fails.
    pub fn new(category: impl Into<String>, config: &FilterConfig, sink: S) -> Self {
        let category = category.into();
        let fields = compile_config(config);

        debug!(
            category = %category,
            enabled = config.enable,
            fields = fields.len(),
            "Created MetadataFilter"
        );

        Self {
            category,
            enabled: config.enable,
            fields,
            sink,
            tracker: None,
            stats: FilterStats::default(),
        }
    }

    /// Attaches an asset tracker.
    pub fn with_asset_tracker(mut self, tracker: Arc<dyn AssetTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Returns the configuration category name.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns true if the filter enriches readings.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables enrichment.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!(category = %self.category, enabled, "Metadata filter toggled");
        }
        self.enabled = enabled;
    }

    /// Returns the compiled metadata fields.
    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Returns the counters collected so far.
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Returns the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the filter and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Applies host options given as JSON text.
    ///
    /// If the text is not valid host options the error is logged and the
    /// filter is left with an empty field list.
    pub fn reconfigure_json(&mut self, text: &str) {
        match FilterConfig::from_json(text) {
            Ok(config) => self.reconfigure(&config),
            Err(e) => {
                error!(category = %self.category, error = %e, "Unable to apply metadata filter reconfiguration");
                self.install(FieldList::default());
                self.stats.record_reconfigure();
            }
        }
    }

    /// Swaps in a new field list and releases the previous one.
    fn install(&mut self, fields: FieldList) {
        let previous = std::mem::replace(&mut self.fields, fields);
        debug!(
            released = previous.len(),
            installed = self.fields.len(),
            "Replaced metadata field list"
        );
        drop(previous);
    }

    /// Appends metadata to every reading and returns the number of
    /// datapoints added.
    fn enrich(&self, readings: &mut ReadingSet) -> usize {
        let mut added = 0;

        for reading in readings.readings_mut() {
            for field in &self.fields {
                let datapoint = field.render(reading);
                reading.add_datapoint(datapoint);
                added += 1;
            }

            if let Some(tracker) = &self.tracker {
                tracker.track(AssetTrackingTuple::new(
                    &self.category,
                    reading.asset_name(),
                    FILTER_EVENT,
                ));
            }
        }

        added
    }
}

impl<S: OutputSink> FilterStage for MetadataFilter<S> {
    fn ingest(&mut self, mut readings: ReadingSet) {
        if !self.enabled {
            trace!(readings = readings.len(), "Metadata filter disabled, passing batch through");
            self.stats.record_passthrough();
            self.sink.emit(readings);
            return;
        }

        let added = self.enrich(&mut readings);
        trace!(readings = readings.len(), added, "Enriched batch");

        self.stats.record_enriched(readings.len(), added);
        self.sink.emit(readings);
    }

    fn reconfigure(&mut self, config: &FilterConfig) {
        let fields = compile_config(config);
        self.install(fields);
        self.set_enabled(config.enable);
        self.stats.record_reconfigure();
    }

    fn shutdown(&mut self) {
        let released = std::mem::take(&mut self.fields);
        self.enabled = false;
        info!(
            category = %self.category,
            released = released.len(),
            "Metadata filter shut down"
        );
    }

    fn name(&self) -> &str {
        FILTER_NAME
    }
}
