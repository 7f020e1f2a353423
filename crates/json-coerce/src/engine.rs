//! The recursive deserialization engine.
//!
//! Each call normalizes its input (see [`crate::decode`]), then dispatches on
//! the tag of the requested target. Without a terminal target the engine
//! re-dispatches with a target inferred from the normalized value's own tag
//! until the tag is stable, so `"123"` first decodes to `123` and is then
//! confirmed as a number, and a document nested inside a string is descended
//! into on the next pass.
//!
//! Recursion depth follows the nesting depth of the input. There is no depth
//! ceiling; callers handling untrusted, deeply nested input should bound it
//! before calling in.

use crate::classify::{classify, TypeTag};
use crate::datetime;
use crate::decode::{decode, Decoded};
use crate::error::CoerceError;
use crate::options::{CompositeDescriptor, DeserializeOptions, TargetDescriptor};
use crate::registry::primitive_for;
use crate::value::{Object, Value};
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::{debug, trace};

/// Stateless coercion engine. Cheap to copy and safe to share across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Engine
    }

    /// Coerces a loosely-typed value according to `options`.
    ///
    /// Fails only in strict mode, when some text in the input is malformed in
    /// a way no date/time heuristic explains.
    pub fn deserialize(&self, value: &Value, options: &DeserializeOptions) -> Result<Value, CoerceError> {
        let decoded = decode(value, options.strict);
        let opaque = matches!(decoded, Decoded::Opaque(_));
        let normalized = decoded.into_value()?;

        let source = classify(value);
        let target = options.target.tag();
        trace!(%source, wanted = %target, "dispatch");

        match target {
            TypeTag::Array => self.to_array(normalized, options),
            TypeTag::Object => self.to_object(normalized, options),
            TypeTag::Date => Ok(to_date(normalized)),
            _ => {
                if let TargetDescriptor::Composite(descriptor) = &options.target {
                    return Ok(hydrate(descriptor, normalized));
                }

                let own = classify(&normalized);
                if own != source || source.is_structural() {
                    let next = options.retarget(TargetDescriptor::from_primitive(primitive_for(&own)));
                    // The literal text of a value without a JSON encoding is
                    // never diagnosed.
                    let next = if opaque { next.strict(false) } else { next };
                    return self.deserialize(&normalized, &next);
                }

                if source == TypeTag::Undefined || value.as_str() == Some("undefined") {
                    return Ok(Value::Undefined);
                }
                if source == TypeTag::Null || value.as_str() == Some("null") {
                    return Ok(Value::Null);
                }

                Ok(normalized)
            }
        }
    }

    /// JSON-encodes the coerced form of `value`.
    ///
    /// Returns `None` when the coerced value is `undefined`.
    pub fn serialize(&self, value: &Value) -> Result<Option<String>, CoerceError> {
        let coerced = self.deserialize(value, &DeserializeOptions::default())?;
        Ok(coerced.to_json().map(|json| json.to_string()))
    }

    /// Coerces `value`, then hydrates a Rust type from the result.
    pub fn deserialize_as<T: DeserializeOwned>(
        &self,
        value: &Value,
        options: &DeserializeOptions,
    ) -> Result<T, CoerceError> {
        let coerced = self.deserialize(value, options)?;
        let json = coerced.to_json().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(json).map_err(CoerceError::Hydrate)
    }

    fn to_array(&self, normalized: Value, options: &DeserializeOptions) -> Result<Value, CoerceError> {
        let items = match normalized {
            Value::Array(items) => items,
            Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
            _ => Vec::new(),
        };
        items
            .iter()
            .map(|item| self.deserialize(item, &element_options(item, options)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn to_object(&self, normalized: Value, options: &DeserializeOptions) -> Result<Value, CoerceError> {
        let props: Object = match normalized {
            Value::Object(props) => props,
            Value::Record(record) => record.fields,
            Value::Array(items) => items.into_iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
            Value::String(s) => s
                .chars()
                .enumerate()
                .map(|(i, c)| (i.to_string(), Value::String(c.to_string())))
                .collect(),
            _ => Object::new(),
        };
        let mut out = Object::with_capacity(props.len());
        for (key, value) in &props {
            out.insert(key.clone(), self.deserialize(value, &element_options(value, options))?);
        }
        Ok(Value::Object(out))
    }
}

/// Each element is coerced toward the primitive its own tag implies.
fn element_options(item: &Value, options: &DeserializeOptions) -> DeserializeOptions {
    options.retarget(TargetDescriptor::from_primitive(primitive_for(&classify(item))))
}

/// Dates pass through. Numbers are epoch milliseconds; anything else is read
/// from its text form.
fn to_date(normalized: Value) -> Value {
    match normalized {
        Value::Date(date) => Value::Date(date),
        Value::Number(ms) if ms.is_finite() => {
            let nanos = (ms.trunc() as i128).saturating_mul(1_000_000);
            Value::Date(OffsetDateTime::from_unix_timestamp_nanos(nanos).ok())
        }
        other => Value::Date(datetime::parse_date(&other.to_text())),
    }
}

/// Copies the declared fields of a record-shaped value onto a fresh instance.
///
/// Input that is not record-shaped leaves the blank instance untouched.
fn hydrate(descriptor: &CompositeDescriptor, normalized: Value) -> Value {
    let mut instance = descriptor.build();
    let mut source = match normalized {
        Value::Object(props) => props,
        Value::Record(record) => record.fields,
        other => {
            debug!(
                target_type = descriptor.name(),
                source = %classify(&other),
                "source is not record-shaped; returning blank instance"
            );
            return Value::Record(instance);
        }
    };
    for field in descriptor.fields() {
        if let Some(value) = source.swap_remove(field) {
            instance.fields.insert(field.clone(), value);
        }
    }
    Value::Record(instance)
}
