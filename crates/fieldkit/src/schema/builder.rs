//! Fluent construction of [`ModelSchema`]s.

use fieldkit_value::{ToValue, Value};

use super::{DefaultFactory, FieldDescriptor, ModelSchema};
use crate::shape::{Describe, Shape};

/// Builder for [`ModelSchema`]. Fields keep the order they are added in.
///
/// ```ignore
/// impl Model for Player {
///     fn schema() -> ModelSchema {
///         ModelSchema::builder("Player")
///             .required::<String>("name")
///             .optional::<bool>("admin", false)
///             .optional::<f64>("highest_score", 1.0)
///             .required::<HashMap<String, String>>("extra_data")
///             .build()
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl ModelSchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// A required field typed as `T`.
    pub fn required<T: Describe + ?Sized>(self, name: &str) -> Self {
        self.required_shape(name, T::shape())
    }

    pub fn required_shape(self, name: &str, shape: Shape) -> Self {
        self.field(FieldDescriptor::required(name, shape))
    }

    /// An optional field typed as `T` with a literal default.
    pub fn optional<T: Describe + ToValue>(self, name: &str, default: T) -> Self {
        self.field(FieldDescriptor::with_default(
            name,
            Some(T::shape()),
            default.to_value(),
        ))
    }

    /// An optional field with a literal default and no type annotation.
    pub fn optional_value(self, name: &str, default: impl Into<Value>) -> Self {
        self.field(FieldDescriptor::with_default(name, None, default.into()))
    }

    /// An optional field typed as `T` whose default is computed.
    pub fn factory<T: Describe + ?Sized>(self, name: &str, factory: DefaultFactory) -> Self {
        self.field(FieldDescriptor::with_factory(name, Some(T::shape()), factory))
    }

    /// An optional computed default with no type annotation.
    pub fn factory_unannotated(self, name: &str, factory: DefaultFactory) -> Self {
        self.field(FieldDescriptor::with_factory(name, None, factory))
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> ModelSchema {
        ModelSchema::new(self.name, self.fields)
    }
}
