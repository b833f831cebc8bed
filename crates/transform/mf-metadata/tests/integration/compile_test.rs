//! Compilation of metadata documents.

use mf_metadata::{compile, compile_str};
use mf_types::{Datapoint, DatapointValue};
use serde_json::{Map, Value};

fn nested_document(depth: usize) -> Value {
    let mut innermost = Map::new();
    innermost.insert(format!("leaf{depth}"), Value::from(depth as i64));
    let mut value = Value::Object(innermost);
    for level in (0..depth).rev() {
        let mut members = Map::new();
        members.insert(format!("leaf{level}"), Value::from(format!("level {level}")));
        members.insert(format!("child{level}"), value);
        value = Value::Object(members);
    }
    value
}

#[test]
fn test_flat_documents_compile_one_to_one() {
    let documents = [
        r#"{"a":"x"}"#,
        r#"{"z":1,"y":2.5,"x":"three"}"#,
        r#"{"Source":"Camera","Area":"North","Floor":-3,"Gain":1e3}"#,
    ];

    for text in documents {
        let parsed: Map<String, Value> = serde_json::from_str(text).unwrap();
        let fields = compile_str(text).unwrap();
        assert_eq!(fields.len(), parsed.len(), "size mismatch for {text}");

        for (field, (name, value)) in fields.iter().zip(parsed.iter()) {
            assert_eq!(field.name(), name);
            assert_eq!(Some(field.value().clone()), DatapointValue::from_json(value));
        }
    }
}

#[test]
fn test_nested_leaves_are_all_flattened() {
    for depth in [1, 4, 16] {
        let fields = compile(&nested_document(depth)).unwrap();
        assert_eq!(fields.len(), depth + 1);

        let mut names = fields.names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), depth + 1);
    }
}

#[test]
fn test_i64_boundaries() {
    let fields =
        compile_str(r#"{"max":9223372036854775807,"min":-9223372036854775807}"#).unwrap();
    let datapoints: Vec<Datapoint> = fields.datapoints().cloned().collect();
    assert_eq!(
        datapoints,
        vec![
            Datapoint::new("max", 9223372036854775807_i64),
            Datapoint::new("min", -9223372036854775807_i64),
        ]
    );
}

#[test]
fn test_mixed_top_level_and_value_object() {
    let fields = compile_str(
        r#"{"Site":"HQ","value":{"Building":"Pearson","Location":"NY"},"Level":2}"#,
    )
    .unwrap();
    assert_eq!(fields.names(), vec!["Site", "Building", "Location", "Level"]);
}

#[test]
fn test_unsupported_members_do_not_stop_compilation() {
    let fields =
        compile_str(r#"{"a":[1],"b":"kept","value":{"c":false,"d":4},"e":null}"#).unwrap();
    assert_eq!(fields.names(), vec!["b", "d"]);
}
