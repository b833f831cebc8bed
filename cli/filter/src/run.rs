//! Execution logic for mf-filter.

use crate::args::{Cli, OutputFormat};
use crate::output::WriterSink;
use anyhow::{Context, Result};
use mf_metadata::{describe, FilterStats, MetadataFilter};
use mf_traits::{FilterStage, InMemoryAssetTracker};
use mf_types::{FilterConfig, Reading, ReadingSet};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Non-blank input lines seen
    pub lines_read: u64,

    /// Lines that could not be decoded as readings
    pub lines_skipped: u64,

    /// Filter counters
    pub stats: FilterStats,

    /// Distinct (category, asset, event) tuples tracked
    pub tracked_assets: usize,

    /// Bytes written to the output
    pub bytes_written: u64,
}

/// Loads host options from a file, or the declared defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<FilterConfig> {
    let Some(path) = path else {
        debug!("No config file given, using declared defaults");
        return Ok(describe().default_filter_config()?);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = FilterConfig::from_json(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    info!(path = %path.display(), enable = config.enable, "Loaded filter config");
    Ok(config)
}

/// Runs the filter over stdin, writing to stdout.
pub fn execute(args: &Cli) -> Result<RunSummary> {
    let mut config = load_config(args.config.as_deref())?;
    if args.enable {
        config.enable = true;
    }

    let stdin = std::io::stdin().lock();
    let stdout = std::io::BufWriter::new(std::io::stdout().lock());

    process(
        &config,
        &args.category,
        args.batch_size,
        args.output_format,
        stdin,
        stdout,
    )
}

/// Runs the filter over NDJSON `input`, writing readings to `output`.
pub fn process<R: BufRead, W: Write>(
    config: &FilterConfig,
    category: &str,
    batch_size: usize,
    format: OutputFormat,
    input: R,
    output: W,
) -> Result<RunSummary> {
    let tracker = Arc::new(InMemoryAssetTracker::new());
    let sink = WriterSink::new(output, format);
    let mut filter = MetadataFilter::new(category, config, sink).with_asset_tracker(tracker.clone());

    let mut summary = RunSummary::default();
    let mut batch: Vec<Reading> = Vec::with_capacity(batch_size);

    for (idx, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        summary.lines_read += 1;

        match serde_json::from_str::<Reading>(line) {
            Ok(reading) => batch.push(reading),
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Skipping undecodable reading");
                summary.lines_skipped += 1;
                continue;
            }
        }

        if batch.len() >= batch_size {
            filter.ingest(ReadingSet::new(std::mem::take(&mut batch)));
        }
    }

    if !batch.is_empty() {
        filter.ingest(ReadingSet::new(batch));
    }

    filter.shutdown();
    summary.stats = filter.stats();
    summary.tracked_assets = tracker.len();

    let sink = filter.into_sink();
    summary.bytes_written = sink.bytes_written();
    sink.finish().context("failed to write output")?;

    Ok(summary)
}
