//! Dynamic value model.
//!
//! [`Value`] is the loosely-typed input and output of the engine. It covers
//! everything JSON can express plus the runtime-only kinds that have no JSON
//! encoding (`undefined`, symbols, functions, big integers), ordered maps,
//! dates and instances of named composite types.

use crate::datetime;
use indexmap::IndexMap;
use serde_json::Number;
use time::OffsetDateTime;

/// Insertion-ordered property bag used for plain objects and records.
pub type Object = IndexMap<String, Value>;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    /// A symbol with an optional description.
    Symbol(Option<String>),
    Array(Vec<Value>),
    Object(Object),
    /// Ordered key/value entries with arbitrary keys.
    Map(Vec<(Value, Value)>),
    /// A UTC instant. `None` is an invalid date.
    Date(Option<OffsetDateTime>),
    Function(Function),
    Record(Record),
}

/// Placeholder for a callable value. Only its name is observable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Function {
    pub name: String,
}

impl Function {
    pub fn named(name: impl Into<String>) -> Self {
        Function { name: name.into() }
    }
}

/// An instance of a named composite type.
///
/// A record without a type name is a bare dictionary with no discoverable
/// type; it classifies as `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub type_name: Option<String>,
    pub fields: Object,
}

impl Record {
    pub fn named(type_name: impl Into<String>) -> Self {
        Record {
            type_name: Some(type_name.into()),
            fields: Object::new(),
        }
    }

    pub fn bare() -> Self {
        Record::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Value {
    /// Parses JSON text into a value.
    pub fn from_json_str(text: &str) -> Result<Value, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(text).map(Value::from)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Encodes the value as JSON.
    ///
    /// Returns `None` for values with no JSON encoding: `undefined`, symbols,
    /// functions and big integers. Inside arrays those become `null`; inside
    /// objects and records the property is dropped. Non-finite numbers and
    /// invalid dates encode as `null`, valid dates as ISO-8601 strings. Map
    /// entries become object properties keyed by the text form of each key.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;
        match self {
            Value::Undefined | Value::Symbol(_) | Value::Function(_) | Value::BigInt(_) => None,
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(*b)),
            Value::Number(n) => Some(number_to_json(*n)),
            Value::String(s) => Some(Json::String(s.clone())),
            Value::Array(items) => Some(Json::Array(
                items.iter().map(|item| item.to_json().unwrap_or(Json::Null)).collect(),
            )),
            Value::Object(props) => Some(Json::Object(object_to_json(props))),
            Value::Record(record) => Some(Json::Object(object_to_json(&record.fields))),
            Value::Map(entries) => {
                let mut out = serde_json::Map::new();
                for (key, value) in entries {
                    if let Some(json) = value.to_json() {
                        out.insert(key.to_text(), json);
                    }
                }
                Some(Json::Object(out))
            }
            Value::Date(date) => Some(
                date.and_then(|d| datetime::to_iso_string(&d))
                    .map(Json::String)
                    .unwrap_or(Json::Null),
            ),
        }
    }

    /// The literal text form of the value, as string conversion renders it.
    pub fn to_text(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_text(*n),
            Value::BigInt(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Symbol(desc) => format!("Symbol({})", desc.as_deref().unwrap_or("")),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) | Value::Record(_) => "[object Object]".to_string(),
            Value::Map(_) => "[object Map]".to_string(),
            Value::Date(Some(date)) => datetime::to_long_string(date),
            Value::Date(None) => "Invalid Date".to_string(),
            Value::Function(f) => format!("function {}() {{ [native code] }}", f.name),
        }
    }
}

fn object_to_json(props: &Object) -> serde_json::Map<String, serde_json::Value> {
    props
        .iter()
        .filter_map(|(key, value)| value.to_json().map(|json| (key.clone(), json)))
        .collect()
}

/// Largest integer magnitude an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    match Number::from_f64(n) {
        Some(num) => serde_json::Value::Number(num),
        None => serde_json::Value::Null,
    }
}

/// Renders a number the way string conversion does: integers without a
/// fractional part, exponent notation outside `[1e-6, 1e21)`.
pub(crate) fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(props) => Value::Object(
                props.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<OffsetDateTime> for Value {
    fn from(date: OffsetDateTime) -> Self {
        Value::Date(Some(date.to_offset(time::UtcOffset::UTC)))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Undefined)
    }
}
