//! Type classification.

use crate::value::Value;
use serde::{Serialize, Serializer};
use std::fmt;

/// The effective runtime type of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Number,
    BigInt,
    Boolean,
    Undefined,
    Null,
    Symbol,
    Object,
    Array,
    Map,
    Date,
    Function,
    /// A named composite type. Holds the lower-cased type name.
    Named(String),
}

impl TypeTag {
    /// Tag for a named composite type.
    pub fn named(name: &str) -> Self {
        TypeTag::Named(name.to_lowercase())
    }

    /// The lower-case label of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::BigInt => "bigint",
            TypeTag::Boolean => "boolean",
            TypeTag::Undefined => "undefined",
            TypeTag::Null => "null",
            TypeTag::Symbol => "symbol",
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::Map => "map",
            TypeTag::Date => "date",
            TypeTag::Function => "function",
            TypeTag::Named(name) => name,
        }
    }

    /// Parses a label. Unknown labels are taken as named composite types.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "string" => TypeTag::String,
            "number" => TypeTag::Number,
            "bigint" => TypeTag::BigInt,
            "boolean" => TypeTag::Boolean,
            "undefined" => TypeTag::Undefined,
            "null" => TypeTag::Null,
            "symbol" => TypeTag::Symbol,
            "object" => TypeTag::Object,
            "array" => TypeTag::Array,
            "map" => TypeTag::Map,
            "date" => TypeTag::Date,
            "function" => TypeTag::Function,
            other => TypeTag::Named(other.to_string()),
        }
    }

    /// Whether the tag describes a structured value the engine descends into.
    pub fn is_structural(&self) -> bool {
        matches!(self, TypeTag::Array | TypeTag::Object | TypeTag::Date)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Returns the type tag of a value.
///
/// Total: every value maps to exactly one tag. A record with no type name has
/// no discoverable type and classifies as [`TypeTag::Null`].
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Undefined => TypeTag::Undefined,
        Value::Null => TypeTag::Null,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::BigInt(_) => TypeTag::BigInt,
        Value::String(_) => TypeTag::String,
        Value::Symbol(_) => TypeTag::Symbol,
        Value::Array(_) => TypeTag::Array,
        Value::Object(_) => TypeTag::Object,
        Value::Map(_) => TypeTag::Map,
        Value::Date(_) => TypeTag::Date,
        Value::Function(_) => TypeTag::Function,
        Value::Record(record) => match &record.type_name {
            Some(name) => TypeTag::named(name),
            None => TypeTag::Null,
        },
    }
}
