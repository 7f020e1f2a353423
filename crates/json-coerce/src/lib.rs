//! Type classification and recursive coercion of loosely-typed data.
//!
//! # Overview
//!
//! Payloads arriving from the network, config files or environment variables
//! often carry numbers, booleans, dates and whole JSON documents encoded as
//! strings. [`deserialize`] walks such a value and resolves every string to
//! what it really holds, descending into arrays and objects, and optionally
//! hydrates the result into a named composite type.
//!
//! # Example
//!
//! ```
//! use json_coerce::{deserialize, serialize, Value};
//! use serde_json::json;
//!
//! let raw = Value::from(json!({"a": "1", "b": "true", "c": "[1,\"2\"]"}));
//! let coerced = deserialize(&raw).unwrap();
//! assert_eq!(coerced, Value::from(json!({"a": 1, "b": true, "c": [1, 2]})));
//!
//! assert_eq!(serialize(&Value::from("50")).unwrap().as_deref(), Some("50"));
//! ```
//!
//! Strict mode (the default) rejects malformed text instead of passing it
//! through:
//!
//! ```
//! use json_coerce::{deserialize, deserialize_with, CoerceError, DeserializeOptions, Value};
//!
//! let raw = Value::from("{malformed json");
//! match deserialize(&raw) {
//!     Err(CoerceError::Ambiguous(err)) => assert_eq!(err.excerpt(), "> malformed json"),
//!     other => panic!("expected a diagnostic, got {:?}", other),
//! }
//!
//! let lenient = deserialize_with(&raw, &DeserializeOptions::lenient()).unwrap();
//! assert_eq!(lenient, raw);
//! ```

pub mod classify;
pub mod datetime;
pub mod decode;
pub mod engine;
pub mod error;
pub mod options;
pub mod registry;
pub mod schema;
pub mod value;

pub use classify::{classify, TypeTag};
pub use decode::Decoded;
pub use engine::Engine;
pub use error::{CoerceError, DiagnosticError};
pub use options::{CompositeDescriptor, DeserializeOptions, RecordBuilder, TargetDescriptor};
pub use registry::{primitive_for, Primitive};
pub use schema::{infer_schema, Schema};
pub use value::{Function, Object, Record, Value};

use serde::de::DeserializeOwned;

/// Coerces `value` with default options (no target, strict).
pub fn deserialize(value: &Value) -> Result<Value, CoerceError> {
    Engine::new().deserialize(value, &DeserializeOptions::default())
}

pub fn deserialize_with(value: &Value, options: &DeserializeOptions) -> Result<Value, CoerceError> {
    Engine::new().deserialize(value, options)
}

/// JSON-encodes the coerced form of `value`. `None` when it coerces to
/// `undefined`.
pub fn serialize(value: &Value) -> Result<Option<String>, CoerceError> {
    Engine::new().serialize(value)
}

/// Coerces `value`, then builds `T` from the result through serde.
pub fn deserialize_as<T: DeserializeOwned>(value: &Value, options: &DeserializeOptions) -> Result<T, CoerceError> {
    Engine::new().deserialize_as(value, options)
}
