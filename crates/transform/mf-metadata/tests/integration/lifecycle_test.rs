//! Host lifecycle: describe, initialize, ingest, reconfigure, shutdown.

use crate::common::{numbered_batch, reading, TestContext};
use mf_metadata::describe;
use mf_traits::{AssetTrackingTuple, FilterStage};
use mf_types::{FilterConfig, ReadingSet};

#[test]
fn test_describe_then_initialize_from_defaults() {
    let info = describe();
    let defaults = info.default_filter_config().unwrap();
    let mut ctx = TestContext::new(info.name, &defaults);

    assert!(!ctx.filter.is_enabled());
    assert!(ctx.filter.fields().is_empty());

    ctx.filter.ingest(numbered_batch("pump", 2));
    let out = ctx.sink.readings();
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|r| r.datapoint_count() == 1));
}

#[test]
fn test_disabled_output_matches_input() {
    let mut ctx = TestContext::from_host_json(
        "metadata",
        r#"{"enable":"false","config":"{ \"Source\" : \"Camera\"}"}"#,
    );

    let input = numbered_batch("test", 5);
    ctx.filter.ingest(input.clone());

    assert_eq!(ctx.sink.batches(), vec![input]);
    assert!(ctx.tracker.is_empty());
}

#[test]
fn test_enabled_adds_source() {
    let mut ctx = TestContext::from_host_json(
        "replace",
        r#"{"enable":"true","config":"{ \"Source\":\"Camera\"}"}"#,
    );

    ctx.filter.ingest(ReadingSet::new(vec![reading("test", "test", 2)]));

    let out = ctx.sink.readings();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].datapoint_count(), 2);
    assert_eq!(out[0].datapoints()[1].name, "Source");
    assert_eq!(out[0].datapoints()[1].value.as_str(), Some("Camera"));
}

#[test]
fn test_placeholder_resolves_per_reading() {
    let mut ctx = TestContext::from_host_json(
        "metadata",
        r#"{"enable":true,"config":{"Source":"Camera $num$"}}"#,
    );

    ctx.filter.ingest(numbered_batch("cam", 3));

    let sources: Vec<String> = ctx
        .sink
        .readings()
        .iter()
        .map(|r| r.datapoint("Source").unwrap().value.to_string())
        .collect();
    assert_eq!(sources, vec!["Camera 0", "Camera 1", "Camera 2"]);
}

#[test]
fn test_value_object_appends_two_fields() {
    let mut ctx = TestContext::from_host_json(
        "metadata",
        r#"{"enable":true,"config":{"value":{"Building":"Pearson","Location":"NY"}}}"#,
    );

    ctx.filter.ingest(ReadingSet::new(vec![reading("test", "test", 2)]));

    let out = &ctx.sink.readings()[0];
    let names: Vec<&str> = out.datapoints().iter().map(|dp| dp.name.as_str()).collect();
    assert_eq!(names, vec!["test", "Building", "Location"]);
    assert_eq!(out.datapoint("Building").unwrap().value.as_str(), Some("Pearson"));
    assert_eq!(out.datapoint("Location").unwrap().value.as_str(), Some("NY"));
}

#[test]
fn test_reconfigure_fully_replaces_behaviour() {
    let mut ctx = TestContext::from_host_json(
        "metadata",
        r#"{"enable":true,"config":{"Source":"Camera","value":{"Building":"Pearson"}}}"#,
    );
    ctx.filter.ingest(numbered_batch("a", 1));

    ctx.filter
        .reconfigure(&FilterConfig::new().with_enable(true).with_config(r#"{"Line":7}"#));
    ctx.filter.ingest(numbered_batch("a", 1));

    let batches = ctx.sink.batches();
    let second = &batches[1].readings()[0];
    assert_eq!(second.datapoint_count(), 2);
    assert!(second.datapoint("Source").is_none());
    assert!(second.datapoint("Building").is_none());
    assert_eq!(second.datapoint("Line").unwrap().value.as_i64(), Some(7));
}

#[test]
fn test_malformed_json_on_initialize_and_reconfigure() {
    let config = FilterConfig::new().with_enable(true).with_config("{\"Source\": Camera}");
    let mut ctx = TestContext::new("metadata", &config);
    assert!(ctx.filter.fields().is_empty());

    ctx.filter.ingest(numbered_batch("a", 1));
    assert_eq!(ctx.sink.readings()[0].datapoint_count(), 1);

    ctx.filter.reconfigure_json(r#"{"enable":true,"config":{"Source":"Camera"}}"#);
    assert_eq!(ctx.filter.fields().len(), 1);

    ctx.filter.reconfigure_json(r#"{"enable":true,"config":"{\"Source\":"}"#);
    assert!(ctx.filter.fields().is_empty());
    assert!(ctx.filter.is_enabled());
}

#[test]
fn test_asset_tracking_per_reading() {
    let mut ctx = TestContext::from_host_json("meta-east", r#"{"enable":true,"config":{"a":1}}"#);

    ctx.filter.ingest(ReadingSet::new(vec![
        reading("pump1", "x", 1),
        reading("pump2", "x", 1),
        reading("pump1", "x", 2),
    ]));

    assert_eq!(ctx.tracker.observations(), 3);
    assert_eq!(
        ctx.tracker.tuples(),
        vec![
            AssetTrackingTuple::new("meta-east", "pump1", "Filter"),
            AssetTrackingTuple::new("meta-east", "pump2", "Filter"),
        ]
    );
}

#[test]
fn test_one_sink_call_per_ingest() {
    let mut ctx = TestContext::from_host_json("metadata", r#"{"enable":true,"config":{"a":1}}"#);

    ctx.filter.ingest(numbered_batch("a", 10));
    ctx.filter.ingest(ReadingSet::default());
    ctx.filter.set_enabled(false);
    ctx.filter.ingest(numbered_batch("a", 3));

    assert_eq!(ctx.sink.batch_count(), 3);
    let stats = ctx.filter.stats();
    assert_eq!(stats.batches_enriched, 2);
    assert_eq!(stats.batches_passed_through, 1);
    assert_eq!(stats.datapoints_added, 10);
}

#[test]
fn test_shutdown() {
    let mut ctx = TestContext::from_host_json("metadata", r#"{"enable":true,"config":{"a":1}}"#);
    ctx.filter.shutdown();

    assert!(ctx.filter.fields().is_empty());
    ctx.filter.ingest(numbered_batch("a", 1));
    assert_eq!(ctx.sink.readings()[0].datapoint_count(), 1);
}
