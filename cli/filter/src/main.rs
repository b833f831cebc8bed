//! mf-filter CLI
//!
//! Streams NDJSON readings through the metadata filter.

use clap::Parser;
use mf_cli_common::{format_bytes, format_number, init_logging};

mod args;
mod output;
mod run;

use args::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout carries only readings
    init_logging(args.log_level)?;

    let summary = run::execute(&args)?;
    let stats = summary.stats;

    eprintln!();
    eprintln!("Filter completed:");
    eprintln!("  Lines read:        {}", format_number(summary.lines_read));
    eprintln!("  Lines skipped:     {}", format_number(summary.lines_skipped));
    eprintln!("  Batches:           {}", format_number(stats.batches()));
    eprintln!("  Readings enriched: {}", format_number(stats.readings_enriched));
    eprintln!("  Datapoints added:  {}", format_number(stats.datapoints_added));
    eprintln!("  Assets tracked:    {}", summary.tracked_assets);
    eprintln!("  Bytes written:     {}", format_bytes(summary.bytes_written));

    // Exit with error code if some input could not be decoded
    if summary.lines_skipped > 0 {
        std::process::exit(4);
    }

    Ok(())
}
