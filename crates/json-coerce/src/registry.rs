//! Primitive coercion targets keyed by type tag.

use crate::classify::TypeTag;

/// A primitive category a value can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Map,
    Date,
    Function,
}

impl Primitive {
    pub fn tag(self) -> TypeTag {
        match self {
            Primitive::String => TypeTag::String,
            Primitive::Number => TypeTag::Number,
            Primitive::Boolean => TypeTag::Boolean,
            Primitive::Object => TypeTag::Object,
            Primitive::Array => TypeTag::Array,
            Primitive::Map => TypeTag::Map,
            Primitive::Date => TypeTag::Date,
            Primitive::Function => TypeTag::Function,
        }
    }
}

/// Returns the canonical coercion target for a tag.
///
/// `symbol`, `bigint`, `undefined`, `null` and named composite tags have no
/// target.
pub fn primitive_for(tag: &TypeTag) -> Option<Primitive> {
    match tag {
        TypeTag::String => Some(Primitive::String),
        TypeTag::Number => Some(Primitive::Number),
        TypeTag::Boolean => Some(Primitive::Boolean),
        TypeTag::Object => Some(Primitive::Object),
        TypeTag::Array => Some(Primitive::Array),
        TypeTag::Map => Some(Primitive::Map),
        TypeTag::Date => Some(Primitive::Date),
        TypeTag::Function => Some(Primitive::Function),
        TypeTag::Symbol
        | TypeTag::BigInt
        | TypeTag::Undefined
        | TypeTag::Null
        | TypeTag::Named(_) => None,
    }
}
