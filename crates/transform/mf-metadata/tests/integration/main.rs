//! Integration tests for the metadata filter.
//!
//! These drive [`mf_metadata::MetadataFilter`] the way a host pipeline does:
//! describe, initialize from host options, ingest batches, reconfigure and
//! shut down, observing results through a collecting sink.

mod common;
mod compile_test;
mod lifecycle_test;
