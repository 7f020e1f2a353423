//! Shallow schema inference.

use crate::classify::{classify, TypeTag};
use crate::value::Value;
use indexmap::IndexMap;

/// Maps a key to the type tag found under it.
pub type Schema = IndexMap<String, TypeTag>;

/// Summarizes the shape of a value.
///
/// - arrays: each element's text form maps to the element's tag. Elements
///   with the same text form overwrite each other; the last one wins.
/// - objects: each property name maps to its value's tag.
/// - anything else: the value's own text form maps to its tag.
pub fn infer_schema(value: &Value) -> Schema {
    let mut schema = Schema::new();
    match value {
        Value::Array(items) => {
            for item in items {
                schema.insert(item.to_text(), classify(item));
            }
        }
        Value::Object(props) => {
            for (key, item) in props {
                schema.insert(key.clone(), classify(item));
            }
        }
        other => {
            schema.insert(other.to_text(), classify(other));
        }
    }
    schema
}
