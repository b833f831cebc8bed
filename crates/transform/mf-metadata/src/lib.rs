//! Metadata enrichment filter for reading pipelines.
//!
//! This crate provides [`MetadataFilter`], a filter stage that appends a
//! statically configured set of datapoints to every reading it ingests.
//!
//! # Features
//!
//! - **Flat and nested metadata**: nested objects are flattened into one list
//! - **Typed values**: strings, 64-bit integers and doubles
//! - **Placeholders**: `$name$` in string values resolves per reading
//! - **Compile-and-swap reconfiguration**: no state leaks between configs
//!
//! # Example
//!
//! ```rust,ignore
//! use mf_metadata::MetadataFilter;
//! use mf_traits::{CollectingSink, FilterStage};
//! use mf_types::FilterConfig;
//!
//! let config = FilterConfig::new()
//!     .with_enable(true)
//!     .with_config(r#"{"Source": "Camera $num$", "value": {"Building": "Pearson"}}"#);
//!
//! let sink = CollectingSink::new();
//! let mut filter = MetadataFilter::new("metadata", &config, sink.clone());
//! filter.ingest(readings);
//! ```

mod compiler;
mod descriptor;
mod filter;
mod stats;
mod template;

pub use compiler::{compile, compile_config, compile_str, FieldList, MetadataField};
pub use descriptor::{describe, PluginInfo, PluginType, FILTER_NAME, INTERFACE_VERSION};
pub use filter::MetadataFilter;
pub use stats::FilterStats;
pub use template::{Template, ASSET_PLACEHOLDER, DELIMITER};
