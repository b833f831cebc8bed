//! Core types for metafill.
//!
//! This crate provides the foundational types used throughout the system:
//! - [`Datapoint`] / [`DatapointValue`] - A named, typed scalar
//! - [`Reading`] - One timestamped measurement for an asset
//! - [`ReadingSet`] - The batch handed from stage to stage
//! - [`FilterConfig`] - Host-level options for the enrichment stage

pub mod config;
pub mod datapoint;
pub mod reading;

pub use config::*;
pub use datapoint::*;
pub use reading::*;
