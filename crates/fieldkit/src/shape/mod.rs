//! Type-shape descriptors.
//!
//! A [`Shape`] is the explicit, already-resolved form of a field's declared
//! type: a scalar, a sequence of shapes, a mapping of shapes, a nested model,
//! or a convertible wrapper. Nested models and convertible wrappers are held
//! by reference ([`ModelRef`], [`ConvertibleRef`]) and only resolved when a
//! walk reaches them, which keeps self-referential models expressible.

mod describe;
mod walker;

pub use describe::Describe;
pub use walker::Walker;

use std::any::{type_name, TypeId};
use std::fmt;

use fieldkit_value::Key;

use crate::convert::{registry, Convertible};
use crate::error::{ConverterDefinitionError, SchemaError};
use crate::schema::{Model, ModelSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Str,
    Int,
    Float,
    Bool,
    /// Any value; its zero-equivalent is `null`.
    Any,
    Seq(Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Model(ModelRef),
    Convertible(ConvertibleRef),
}

impl Shape {
    pub fn seq(item: Shape) -> Self {
        Self::Seq(Box::new(item))
    }

    pub fn map(key: Shape, value: Shape) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn model<M: Model>() -> Self {
        Self::Model(ModelRef::of::<M>())
    }

    pub fn convertible<C: Convertible>() -> Self {
        Self::Convertible(ConvertibleRef::of::<C>())
    }

    /// Shape of any [`Describe`] type.
    pub fn of<T: Describe + ?Sized>() -> Self {
        T::shape()
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Str | Self::Int | Self::Float | Self::Bool | Self::Any
        )
    }

    /// Whether this shape may key a mapping.
    pub fn is_key(&self) -> bool {
        matches!(self, Self::Str | Self::Int | Self::Bool)
    }

    /// Zero-equivalent key for a non-string key shape.
    ///
    /// String keys are not handled here: they get the placeholder sentinel.
    /// Float keys have no zero key: [`Key`] has no float variant because
    /// `f64` is neither `Eq` nor `Hash`, so `dict[float, V]` is reported as
    /// an unsupported key instead of keyed by `0.0`.
    pub fn zero_key(&self) -> Option<Key> {
        match self {
            Self::Int => Some(Key::Int(0)),
            Self::Bool => Some(Key::Bool(false)),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => f.write_str("str"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Bool => f.write_str("bool"),
            Self::Any => f.write_str("any"),
            Self::Seq(item) => write!(f, "list[{item}]"),
            Self::Map(k, v) => write!(f, "dict[{k}, {v}]"),
            Self::Model(m) => f.write_str(m.name()),
            Self::Convertible(c) => f.write_str(c.name()),
        }
    }
}

// -------------------------------------------------------------------------
// ModelRef

/// Lazy reference to a nested model type.
#[derive(Clone, Copy)]
pub struct ModelRef {
    id: TypeId,
    name: &'static str,
    schema: fn() -> ModelSchema,
}

impl ModelRef {
    pub fn of<M: Model>() -> Self {
        Self {
            id: TypeId::of::<M>(),
            name: type_name::<M>(),
            schema: M::schema,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Builds the referenced model's schema.
    pub fn schema(&self) -> ModelSchema {
        (self.schema)()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelRef {}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.name).finish()
    }
}

// -------------------------------------------------------------------------
// ConvertibleRef

/// Lazy reference to a [`Convertible`] wrapper type.
#[derive(Clone, Copy)]
pub struct ConvertibleRef {
    id: TypeId,
    name: &'static str,
    first_source: fn() -> Result<Shape, ConverterDefinitionError>,
}

impl ConvertibleRef {
    pub fn of<C: Convertible>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
            first_source: first_source_shape::<C>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shape of the source type accepted by the first-declared converter.
    pub fn first_source(&self) -> Result<Shape, SchemaError> {
        Ok((self.first_source)()?)
    }
}

fn first_source_shape<C: Convertible>() -> Result<Shape, ConverterDefinitionError> {
    let registry = registry::<C>()?;
    registry
        .first_source()
        .map(|param| param.shape.clone())
        .ok_or(ConverterDefinitionError::Empty {
            target: type_name::<C>(),
        })
}

impl PartialEq for ConvertibleRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConvertibleRef {}

impl fmt::Debug for ConvertibleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConvertibleRef").field(&self.name).finish()
    }
}
