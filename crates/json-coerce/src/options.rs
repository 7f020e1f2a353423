//! Per-call configuration of the engine.

use crate::classify::TypeTag;
use crate::registry::Primitive;
use crate::value::{Record, Value};
use std::fmt;
use std::sync::Arc;

/// Builds a fresh blank instance of a composite type.
pub type RecordBuilder = dyn Fn() -> Record + Send + Sync;

/// Describes a named composite type values can be hydrated into.
#[derive(Clone)]
pub struct CompositeDescriptor {
    name: String,
    fields: Vec<String>,
    builder: Arc<RecordBuilder>,
}

impl CompositeDescriptor {
    /// A descriptor whose blank instance holds every declared field as
    /// `undefined`.
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let blank_name = name.clone();
        let blank_fields = fields.clone();
        CompositeDescriptor {
            name,
            fields,
            builder: Arc::new(move || {
                blank_fields.iter().fold(Record::named(blank_name.clone()), |record, field| {
                    record.with_field(field.clone(), Value::Undefined)
                })
            }),
        }
    }

    /// Replaces the builder, e.g. to give declared fields default values.
    pub fn with_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn() -> Record + Send + Sync + 'static,
    {
        self.builder = Arc::new(builder);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn build(&self) -> Record {
        (self.builder)()
    }
}

impl fmt::Debug for CompositeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// What shape `deserialize` should coerce its output into.
#[derive(Debug, Clone, Default)]
pub enum TargetDescriptor {
    /// No preference; the engine infers the target.
    #[default]
    None,
    Primitive(Primitive),
    Composite(CompositeDescriptor),
}

impl TargetDescriptor {
    /// The tag an instance of the target would classify as.
    pub fn tag(&self) -> TypeTag {
        match self {
            TargetDescriptor::None => TypeTag::Undefined,
            TargetDescriptor::Primitive(p) => p.tag(),
            TargetDescriptor::Composite(c) => TypeTag::named(&c.name),
        }
    }

    pub(crate) fn from_primitive(primitive: Option<Primitive>) -> Self {
        primitive.map_or(TargetDescriptor::None, TargetDescriptor::Primitive)
    }
}

impl From<Primitive> for TargetDescriptor {
    fn from(p: Primitive) -> Self {
        TargetDescriptor::Primitive(p)
    }
}

impl From<CompositeDescriptor> for TargetDescriptor {
    fn from(c: CompositeDescriptor) -> Self {
        TargetDescriptor::Composite(c)
    }
}

/// Options for a `deserialize` call.
#[derive(Debug, Clone)]
pub struct DeserializeOptions {
    pub target: TargetDescriptor,
    /// Raise a diagnostic on ambiguous decode failures instead of falling
    /// back to the literal text.
    pub strict: bool,
}

impl Default for DeserializeOptions {
    fn default() -> Self {
        DeserializeOptions {
            target: TargetDescriptor::None,
            strict: true,
        }
    }
}

impl DeserializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self::default().strict(false)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn target(mut self, target: impl Into<TargetDescriptor>) -> Self {
        self.target = target.into();
        self
    }

    /// Same strictness, different target.
    pub(crate) fn retarget(&self, target: TargetDescriptor) -> Self {
        DeserializeOptions {
            target,
            strict: self.strict,
        }
    }
}
