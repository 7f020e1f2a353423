//! Integration tests for `deserialize` / `serialize`.

use json_coerce::{
    classify, datetime, deserialize, deserialize_as, deserialize_with, serialize, CoerceError,
    CompositeDescriptor, DeserializeOptions, Primitive, Record, TypeTag, Value,
};
use serde::Deserialize;
use serde_json::json;
use time::macros::datetime;

fn de(value: impl Into<Value>) -> Value {
    deserialize(&value.into()).unwrap_or_else(|e| panic!("deserialize failed: {}", e))
}

fn lenient(value: impl Into<Value>) -> Value {
    deserialize_with(&value.into(), &DeserializeOptions::lenient())
        .unwrap_or_else(|e| panic!("deserialize failed: {}", e))
}

fn js(v: serde_json::Value) -> Value {
    Value::from(v)
}

// ----------------------------------------------------------------- Primitives

#[test]
fn test_undefined() {
    assert_eq!(de(Value::Undefined), Value::Undefined);
    assert_eq!(de("undefined"), Value::Undefined);
    assert_eq!(classify(&de("undefined")), TypeTag::Undefined);
}

#[test]
fn test_null() {
    assert_eq!(de(Value::Null), Value::Null);
    assert_eq!(de("null"), Value::Null);
}

#[test]
fn test_string() {
    let out = de("Foo Baa");
    assert_eq!(out, Value::from("Foo Baa"));
    assert_eq!(classify(&out), TypeTag::String);
}

#[test]
fn test_number() {
    assert_eq!(de(50), Value::Number(50.0));
    assert_eq!(de("50"), Value::Number(50.0));
    assert_eq!(de("100"), Value::Number(100.0));
    assert_eq!(de("-2.5"), Value::Number(-2.5));
}

#[test]
fn test_boolean() {
    assert_eq!(de(true), Value::Bool(true));
    assert_eq!(de("true"), Value::Bool(true));
    assert_eq!(de(false), Value::Bool(false));
    assert_eq!(de("false"), Value::Bool(false));
}

#[test]
fn test_empty_string_stays_text() {
    assert_eq!(de(""), Value::from(""));
}

#[test]
fn test_resolved_primitives_are_stable() {
    for raw in [Value::from("true"), Value::from("50"), Value::from("null"), Value::from("Foo Baa")] {
        let once = de(raw);
        assert_eq!(de(once.clone()), once);
    }
}

// ----------------------------------------------------------------- Structures

#[test]
fn test_array_text() {
    assert_eq!(de("[1,\"2\",3]"), js(json!([1, 2, 3])));
}

#[test]
fn test_object_text() {
    assert_eq!(de("{\"a\":1,\"b\":\"true\"}"), js(json!({"a": 1, "b": true})));
}

#[test]
fn test_array_of_mixed_items() {
    let raw = js(json!([1, "true", "foo", ["1", "2"], "{\"a\":1,\"b\":\"A\",\"c\":true}", "[]"]));
    let out = lenient(raw);
    assert_eq!(out, js(json!([1, true, "foo", [1, 2], {"a": 1, "b": "A", "c": true}, []])));
    assert_eq!(classify(&out), TypeTag::Array);
}

#[test]
fn test_object_values() {
    let out = de(js(json!({"a": "1", "b": "A", "c": "true"})));
    assert_eq!(out, js(json!({"a": 1, "b": "A", "c": true})));
    assert_eq!(classify(&out), TypeTag::Object);
}

#[test]
fn test_strict_mode_reaches_nested_strings() {
    let raw = js(json!({"ok": "1", "bad": "[1,}"}));
    let err = deserialize(&raw).unwrap_err();
    match err {
        CoerceError::Ambiguous(diag) => {
            assert_eq!(diag.offending_text(), "[1,}");
            assert_eq!(diag.offset(), 3);
            assert_eq!(diag.excerpt(), "> }");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(lenient(raw), js(json!({"ok": 1, "bad": "[1,}"})));
}

#[test]
fn test_map_and_record_flatten_to_objects() {
    let map = Value::Map(vec![(Value::from("a"), Value::from("1"))]);
    assert_eq!(de(map), js(json!({"a": 1})));

    let record = Record::named("Point").with_field("x", "3").with_field("y", 4);
    assert_eq!(de(record), js(json!({"x": 3, "y": 4})));
}

// ----------------------------------------------------------------- Dates

#[test]
fn test_date_text() {
    let text = "2024-01-15T10:30:00.000Z";
    assert_eq!(de(text), Value::Date(datetime::parse_date(text)));
    assert_eq!(de(text), Value::from(datetime!(2024-01-15 10:30 UTC)));
}

#[test]
fn test_long_form_date_text() {
    let text = "Mon Jan 15 2024 10:30:00 GMT+0000 (Coordinated Universal Time)";
    assert_eq!(de(text), Value::from(datetime!(2024-01-15 10:30 UTC)));
}

#[test]
fn test_time_of_day_text() {
    let out = de("23:15:00 GMT-0200 (Fernando de Noronha Standard Time)");
    assert_eq!(out, Value::from(datetime!(1970-01-02 1:15 UTC)));
}

#[test]
fn test_time_of_day_with_positive_offset() {
    let out = de("10:30:00 GMT+0200 (Eastern European Standard Time)");
    assert_eq!(out, Value::from(datetime!(1970-01-01 8:30 UTC)));
}

#[test]
fn test_date_value_round_trips() {
    let date = Value::from(datetime!(2024-01-15 10:30:00.250 UTC));
    assert_eq!(de(date.clone()), date);
}

#[test]
fn test_date_target() {
    let opts = DeserializeOptions::new().target(Primitive::Date);
    let out = deserialize_with(&Value::from("\"2024-01-15\""), &opts).unwrap();
    assert_eq!(out, Value::from(datetime!(2024-01-15 0:00 UTC)));
}

// ----------------------------------------------------------------- Strictness

#[test]
fn test_strict_rejects_malformed_json() {
    let err = deserialize(&Value::from("{malformed json")).unwrap_err();
    let CoerceError::Ambiguous(diag) = err else {
        panic!("expected a diagnostic");
    };
    assert_eq!(diag.offset(), 1);
    assert_eq!(diag.excerpt(), "> malformed json");
}

#[test]
fn test_lenient_returns_text_unchanged() {
    assert_eq!(lenient("{malformed json"), Value::from("{malformed json"));
}

#[test]
fn test_strict_accepts_hash_like_tokens() {
    assert_eq!(de("9f86d081884c7d65"), Value::from("9f86d081884c7d65"));
}

// ----------------------------------------------------------------- Targets

#[test]
fn test_composite_target_copies_declared_fields() {
    let user = CompositeDescriptor::new("User", ["name", "age"]);
    let opts = DeserializeOptions::new().target(user);
    let out = deserialize_with(&Value::from("{\"name\":\"Ada\",\"age\":36,\"admin\":true}"), &opts).unwrap();

    let Value::Record(record) = out else {
        panic!("expected a record");
    };
    assert_eq!(record.type_name.as_deref(), Some("User"));
    assert_eq!(record.get("name"), Some(&Value::from("Ada")));
    assert_eq!(record.get("age"), Some(&Value::Number(36.0)));
    assert_eq!(record.get("admin"), None);
    assert_eq!(classify(&Value::Record(record)), TypeTag::named("user"));
}

#[test]
fn test_composite_target_keeps_builder_defaults() {
    let user = CompositeDescriptor::new("User", ["name", "age"])
        .with_builder(|| Record::named("User").with_field("name", "anonymous").with_field("age", 0));
    let opts = DeserializeOptions::new().target(user);
    let out = deserialize_with(&Value::from("{\"age\":7}"), &opts).unwrap();
    let expected = Record::named("User").with_field("name", "anonymous").with_field("age", 7);
    assert_eq!(out, Value::Record(expected));
}

#[test]
fn test_array_target_descends_per_element() {
    let opts = DeserializeOptions::new().target(Primitive::Array);
    let out = deserialize_with(&js(json!(["1", "[\"2\"]", "false"])), &opts).unwrap();
    assert_eq!(out, js(json!([1, [2], false])));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Settings {
    port: u16,
    verbose: bool,
    tags: Vec<String>,
}

#[test]
fn test_deserialize_as_rust_type() {
    let raw = js(json!({"port": "8080", "verbose": "true", "tags": "[\"a\",\"b\"]"}));
    let settings: Settings = deserialize_as(&raw, &DeserializeOptions::default()).unwrap();
    assert_eq!(
        settings,
        Settings { port: 8080, verbose: true, tags: vec!["a".into(), "b".into()] }
    );
}

#[test]
fn test_deserialize_as_reports_shape_mismatch() {
    let raw = js(json!({"port": "not a port"}));
    let err = deserialize_as::<Settings>(&raw, &DeserializeOptions::lenient()).unwrap_err();
    assert!(matches!(err, CoerceError::Hydrate(_)), "got: {:?}", err);
}

// ----------------------------------------------------------------- Serialize

#[test]
fn test_serialize() {
    assert_eq!(serialize(&Value::from("50")).unwrap().as_deref(), Some("50"));
    assert_eq!(
        serialize(&js(json!({"a": "1", "b": ["true"]}))).unwrap().as_deref(),
        Some("{\"a\":1,\"b\":[true]}")
    );
    assert_eq!(serialize(&Value::Undefined).unwrap(), None);
}

#[test]
fn test_top_level_date_text_serializes_back_as_text() {
    let raw = Value::from("2024-01-15");
    assert_eq!(de(raw.clone()), Value::from(datetime!(2024-01-15 0:00 UTC)));

    let text = serialize(&raw).unwrap().unwrap();
    assert_eq!(text, "\"2024-01-15T00:00:00.000Z\"");
    // The quotes unwrap once and the tag is already stable.
    assert_eq!(de(text), Value::from("2024-01-15T00:00:00.000Z"));

    let nested = serialize(&js(json!(["2024-01-15"]))).unwrap().unwrap();
    assert_eq!(de(nested), Value::Array(vec![Value::from(datetime!(2024-01-15 0:00 UTC))]));
}

#[test]
fn test_serialize_dates_as_iso() {
    let out = serialize(&Value::from("January 15, 2024")).unwrap();
    assert_eq!(out.as_deref(), Some("\"2024-01-15T00:00:00.000Z\""));
}
