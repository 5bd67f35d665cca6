//! Model schemas.
//!
//! A [`ModelSchema`] is the ordered list of fields a model declares, each
//! with its required flag, declared type and default. Types expose their
//! schema through the [`Model`] trait; nested models are referenced from
//! field shapes with [`Shape::model`].

mod builder;
mod validate;

pub use builder::ModelSchemaBuilder;
pub use validate::validate_model;

use std::fmt;
use std::sync::Arc;

use fieldkit_value::{ToValue, Value};

use crate::shape::{ModelRef, Shape};

/// A structured data model with a declared schema.
pub trait Model: 'static {
    fn schema() -> ModelSchema;
}

/// Ordered field declarations of one model.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder::new(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One field of a model.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    /// The field's evaluated type annotation, if it has one.
    pub declared: Option<Shape>,
    /// Type recorded for the field when its annotation is unavailable,
    /// e.g. inferred from a literal default.
    pub recorded: Option<Shape>,
    pub default: FieldDefault,
}

impl FieldDescriptor {
    pub fn required(name: impl Into<String>, declared: Shape) -> Self {
        Self {
            name: name.into(),
            declared: Some(declared),
            recorded: None,
            default: FieldDefault::Required,
        }
    }

    pub fn with_default(name: impl Into<String>, declared: Option<Shape>, default: Value) -> Self {
        Self {
            name: name.into(),
            declared,
            recorded: None,
            default: FieldDefault::Value(default),
        }
    }

    pub fn with_factory(
        name: impl Into<String>,
        declared: Option<Shape>,
        factory: DefaultFactory,
    ) -> Self {
        Self {
            name: name.into(),
            declared,
            recorded: None,
            default: FieldDefault::Factory(factory),
        }
    }

    pub fn recorded(mut self, shape: Shape) -> Self {
        self.recorded = Some(shape);
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.default, FieldDefault::Required)
    }

    /// The declared shape, falling back to the recorded one.
    pub fn resolved_shape(&self) -> Option<&Shape> {
        self.declared.as_ref().or(self.recorded.as_ref())
    }
}

/// How a field gets its value when none is supplied.
#[derive(Debug, Clone)]
pub enum FieldDefault {
    Required,
    Value(Value),
    Factory(DefaultFactory),
}

/// What a default factory produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryKind {
    Seq,
    Map,
    Model(ModelRef),
    Other,
}

impl FactoryKind {
    /// Sequences, mappings and nested models are re-derived from the field's
    /// declared type instead of echoing the factory output.
    pub fn is_templatable(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// A computed default.
#[derive(Clone)]
pub struct DefaultFactory {
    kind: FactoryKind,
    make: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl DefaultFactory {
    pub fn new<F>(kind: FactoryKind, make: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            kind,
            make: Arc::new(make),
        }
    }

    /// A factory producing a sequence, e.g. `Vec::new`.
    pub fn seq<T, F>(make: F) -> Self
    where
        T: ToValue,
        F: Fn() -> Vec<T> + Send + Sync + 'static,
    {
        Self::new(FactoryKind::Seq, move || make().to_value())
    }

    /// A factory producing a mapping, e.g. `HashMap::new`.
    pub fn map<T, F>(make: F) -> Self
    where
        T: ToValue,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(FactoryKind::Map, move || make().to_value())
    }

    /// A factory constructing a default instance of a nested model.
    pub fn model<M>() -> Self
    where
        M: Model + Default + ToValue,
    {
        Self::new(FactoryKind::Model(ModelRef::of::<M>()), || {
            M::default().to_value()
        })
    }

    /// Any other computed default; always echoed as-is.
    pub fn other<T, F>(make: F) -> Self
    where
        T: ToValue,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(FactoryKind::Other, move || make().to_value())
    }

    pub fn kind(&self) -> &FactoryKind {
        &self.kind
    }

    pub fn is_templatable(&self) -> bool {
        self.kind.is_templatable()
    }

    /// Runs the factory.
    pub fn produce(&self) -> Value {
        (self.make)()
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultFactory")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
