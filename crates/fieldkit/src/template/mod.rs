//! Template synthesis.
//!
//! Walks a model schema and produces a placeholder [`Value`] with every
//! field present:
//!
//! - nested models recurse into their own schema;
//! - convertible wrappers are templated as the source type of their
//!   first-declared converter;
//! - `str` becomes the upper-cased field name;
//! - `dict[K, V]` becomes a single entry keyed by [`PLACEHOLDER_DICT_KEY`]
//!   (string keys) or the key type's zero value;
//! - `list[T]` becomes a single-element list;
//! - other scalars become their zero value.
//!
//! Optional fields echo their default unless it comes from a sequence,
//! mapping or model factory, in which case the declared type drives the
//! placeholder instead.

use std::any::TypeId;

use fieldkit_value::{Key, Value};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::constants::PLACEHOLDER_DICT_KEY;
use crate::error::SchemaError;
use crate::schema::{validate_model, FieldDefault, Model, ModelSchema};
use crate::shape::{ModelRef, Shape};

/// Builds the template of model `M`.
pub fn build_template<M: Model>() -> Result<Value, SchemaError> {
    Synthesizer::new().synthesize_model(&ModelRef::of::<M>())
}

/// Builds the template of a schema that is not tied to a Rust type.
pub fn build_template_from_schema(schema: &ModelSchema) -> Result<Value, SchemaError> {
    Synthesizer::new().synthesize_fields(schema)
}

/// Recursive placeholder builder.
///
/// Tracks the models and convertible wrappers currently being expanded; a
/// type that shows up again inside its own expansion can never bottom out
/// and is reported as [`SchemaError::Recursive`].
#[derive(Debug, Default)]
pub struct Synthesizer {
    path: Vec<(TypeId, &'static str)>,
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder for a value of `shape` held by the field `field_name`.
    pub fn synthesize(&mut self, shape: &Shape, field_name: &str) -> Result<Value, SchemaError> {
        match shape {
            Shape::Model(model) => self.synthesize_model(model),
            Shape::Convertible(conv) => {
                self.enter(conv.id(), conv.name())?;
                let result = conv
                    .first_source()
                    .and_then(|source| self.synthesize(&source, field_name));
                self.leave();
                result
            }
            Shape::Str => Ok(Value::Str(field_name.to_uppercase())),
            Shape::Map(key, value) => {
                let key = match key.as_ref() {
                    Shape::Str => Key::Str(PLACEHOLDER_DICT_KEY.to_string()),
                    other => other.zero_key().ok_or_else(|| SchemaError::UnsupportedKey {
                        model: self.current_model().to_string(),
                        field: field_name.to_string(),
                        key: other.to_string(),
                    })?,
                };
                let value = self.synthesize(value, field_name)?;
                Ok(Value::Map(IndexMap::from([(key, value)])))
            }
            Shape::Seq(item) => Ok(Value::Seq(vec![self.synthesize(item, field_name)?])),
            Shape::Int => Ok(Value::Int(0)),
            Shape::Float => Ok(Value::Float(0.0)),
            Shape::Bool => Ok(Value::Bool(false)),
            Shape::Any => Ok(Value::Null),
        }
    }

    /// Template of a nested model.
    pub fn synthesize_model(&mut self, model: &ModelRef) -> Result<Value, SchemaError> {
        self.enter(model.id(), model.name())?;
        let result = self.synthesize_fields(&model.schema());
        self.leave();
        result
    }

    /// Template of a schema's fields, in declaration order.
    pub fn synthesize_fields(&mut self, schema: &ModelSchema) -> Result<Value, SchemaError> {
        validate_model(schema)?;
        debug!(model = %schema.name, fields = schema.fields.len(), "synthesizing template");

        let mut out = IndexMap::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let value = match &field.default {
                FieldDefault::Required => {
                    let shape =
                        field
                            .resolved_shape()
                            .ok_or_else(|| SchemaError::UnresolvedField {
                                model: schema.name.clone(),
                                field: field.name.clone(),
                            })?;
                    self.synthesize(shape, &field.name)?
                }
                FieldDefault::Factory(factory) => match &field.declared {
                    Some(shape) if factory.is_templatable() => {
                        self.synthesize(shape, &field.name)?
                    }
                    _ => factory.produce(),
                },
                FieldDefault::Value(default) => default.clone(),
            };
            trace!(model = %schema.name, field = %field.name, kind = value.kind(), "synthesized field");
            out.insert(Key::Str(field.name.clone()), value);
        }
        Ok(Value::Map(out))
    }

    fn enter(&mut self, id: TypeId, name: &'static str) -> Result<(), SchemaError> {
        if self.path.iter().any(|(seen, _)| *seen == id) {
            let mut path: Vec<&str> = self.path.iter().map(|(_, n)| *n).collect();
            path.push(name);
            return Err(SchemaError::Recursive {
                name: name.to_string(),
                path: path.join(" -> "),
            });
        }
        self.path.push((id, name));
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
    }

    fn current_model(&self) -> &str {
        self.path.last().map_or("<schema>", |(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DefaultFactory, FieldDescriptor};

    #[test]
    fn empty_schema() {
        let schema = ModelSchema::builder("Model").build();
        assert_eq!(build_template_from_schema(&schema), Ok(Value::empty_map()));
    }

    #[test]
    fn leaf_shapes() {
        let mut s = Synthesizer::new();
        assert_eq!(s.synthesize(&Shape::Str, "extra_data"), Ok(Value::from("EXTRA_DATA")));
        assert_eq!(s.synthesize(&Shape::Int, "n"), Ok(Value::Int(0)));
        assert_eq!(s.synthesize(&Shape::Float, "n"), Ok(Value::Float(0.0)));
        assert_eq!(s.synthesize(&Shape::Bool, "n"), Ok(Value::Bool(false)));
        assert_eq!(s.synthesize(&Shape::Any, "n"), Ok(Value::Null));
    }

    #[test]
    fn bool_keyed_map() {
        let mut s = Synthesizer::new();
        assert_eq!(
            s.synthesize(&Shape::map(Shape::Bool, Shape::Str), "flags"),
            Ok(Value::map([(Key::Bool(false), Value::from("FLAGS"))]))
        );
    }

    #[test]
    fn unsupported_key_reports_field() {
        let mut s = Synthesizer::new();
        let err = s
            .synthesize(&Shape::map(Shape::seq(Shape::Int), Shape::Str), "grid")
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnsupportedKey {
                model: "<schema>".into(),
                field: "grid".into(),
                key: "list[int]".into(),
            }
        );
    }

    #[test]
    fn recorded_shape_backs_missing_annotation() {
        let mut field = FieldDescriptor::required("count", Shape::Str);
        field.declared = None;
        let schema = ModelSchema::new("M", vec![field.recorded(Shape::Int)]);
        assert_eq!(
            build_template_from_schema(&schema),
            Ok(Value::map([("count", Value::Int(0))]))
        );
    }

    #[test]
    fn literal_default_with_unsupported_key_is_echoed() {
        let schema = ModelSchema::new(
            "M",
            vec![FieldDescriptor::with_default(
                "ratios",
                Some(Shape::map(Shape::Float, Shape::Str)),
                Value::empty_map(),
            )],
        );
        assert_eq!(
            build_template_from_schema(&schema),
            Ok(Value::map([("ratios", Value::empty_map())]))
        );
    }

    #[test]
    fn unannotated_templatable_factory_is_echoed() {
        let schema = ModelSchema::builder("M")
            .factory_unannotated(
                "tags",
                DefaultFactory::seq(|| vec!["default".to_string()]),
            )
            .build();
        assert_eq!(
            build_template_from_schema(&schema),
            Ok(Value::map([("tags", Value::Seq(vec![Value::from("default")]))]))
        );
    }

    #[test]
    fn required_field_without_any_shape_fails() {
        let mut field = FieldDescriptor::required("data", Shape::Any);
        field.declared = None;
        let schema = ModelSchema::new("M", vec![field]);
        assert_eq!(
            build_template_from_schema(&schema),
            Err(SchemaError::UnresolvedField {
                model: "M".into(),
                field: "data".into(),
            })
        );
    }
}
