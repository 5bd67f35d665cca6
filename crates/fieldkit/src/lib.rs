//! Per-field value converters and schema-driven template synthesis.
//!
//! Two independent pieces live here:
//!
//! - [`convert`]: a per-type registry of converter functions. A type that
//!   implements [`Convertible`] declares one converter per accepted source
//!   type; [`registry`] builds (once, process-wide) and caches the dispatch
//!   table, and [`convert()`] routes a value to the converter registered for
//!   its exact runtime type.
//! - [`template`]: walks a model's declared schema ([`Model`],
//!   [`ModelSchema`]) and produces a structurally complete placeholder
//!   [`Value`] for it.
//!
//! ```ignore
//! let template = fieldkit::build_template::<GameSystem>()?;
//! println!("{}", serde_json::to_string_pretty(&template)?);
//! ```

pub mod constants;
pub mod convert;
pub mod error;
pub mod schema;
pub mod shape;
pub mod template;

pub use convert::{
    convert, registry, BoxError, ConverterEntry, ConverterFn, ConverterRegistry, Converters,
    Convertible, ParamInfo,
};
pub use error::{ConversionError, ConverterDefinitionError, SchemaError};
pub use fieldkit_value::{Key, ToKey, ToValue, Value};
pub use schema::{
    validate_model, DefaultFactory, FactoryKind, FieldDefault, FieldDescriptor, Model,
    ModelSchema, ModelSchemaBuilder,
};
pub use shape::{ConvertibleRef, Describe, ModelRef, Shape, Walker};
pub use template::{build_template, build_template_from_schema, Synthesizer};
