//! Shared utilities for metafill CLI binaries.
//!
//! This crate provides the logging setup and output formatting used by the
//! `mf-filter` harness.

pub mod args;
pub mod format;
pub mod logging;

pub use args::LogLevel;
pub use format::{format_bytes, format_number};
pub use logging::init_logging;
