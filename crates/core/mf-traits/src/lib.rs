//! Core traits for metafill.
//!
//! This crate defines the seams between a pipeline stage and its host:
//! - [`FilterStage`] - Lifecycle of a filter stage (ingest, reconfigure, shutdown)
//! - [`OutputSink`] - Where a stage forwards its batch
//! - [`AssetTracker`] - Records which assets passed through which stage

pub mod asset;
pub mod sink;
pub mod stage;

pub use asset::*;
pub use sink::*;
pub use stage::*;
