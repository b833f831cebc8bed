//! CLI argument definitions for mf-filter.

use clap::{Parser, ValueEnum};
pub use mf_cli_common::LogLevel;
use std::path::PathBuf;

/// Append configured metadata to readings streamed as NDJSON.
///
/// Reads one reading per line from stdin, runs batches through the metadata
/// filter and writes the enriched readings to stdout. Logs go to stderr.
///
/// ## Input format
///
///   {"asset_code": "pump1", "user_ts": "2024-01-01T00:00:00Z", "readings": {"num": 2}}
///
/// ## Examples
///
/// Enrich with a config file:
///   cat readings.ndjson | mf-filter --config metadata.json
///
/// Force-enable the stage with the default (empty) metadata:
///   mf-filter --enable < readings.ndjson
#[derive(Parser, Debug)]
#[command(name = "mf-filter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host options file: {"enable": bool, "config": {...}}
    #[arg(short = 'c', long, env = "MF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable the filter regardless of the config file
    #[arg(long)]
    pub enable: bool,

    /// Category name reported to asset tracking
    #[arg(long, default_value = "metadata")]
    pub category: String,

    /// Readings per batch (must be >= 1)
    #[arg(short = 'b', long, default_value = "100", value_parser = parse_positive_usize)]
    pub batch_size: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "jsonl")]
    pub output_format: OutputFormat,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Output format for enriched readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one reading per line)
    Jsonl,
    /// Pretty-printed JSON
    Json,
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mf-filter"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.enable);
        assert_eq!(cli.category, "metadata");
        assert_eq!(cli.batch_size, 100);
        assert_eq!(cli.output_format, OutputFormat::Jsonl);
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "mf-filter",
            "--config",
            "meta.json",
            "--enable",
            "--category",
            "east",
            "-b",
            "5",
            "--output-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config.unwrap().to_str(), Some("meta.json"));
        assert!(cli.enable);
        assert_eq!(cli.category, "east");
        assert_eq!(cli.batch_size, 5);
        assert_eq!(cli.output_format, OutputFormat::Json);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_batch_size_must_be_positive() {
        assert!(Cli::try_parse_from(["mf-filter", "--batch-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["mf-filter", "--batch-size", "many"]).is_err());
    }
}
