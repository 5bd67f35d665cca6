//! Schema integrity checks.

use std::collections::HashSet;

use super::{FieldDefault, ModelSchema};
use crate::error::SchemaError;
use crate::shape::{Shape, Walker};

/// Validates a model schema for structural integrity.
///
/// Checks that field names are unique, that every required field has a
/// resolvable shape, and that mapping keys are strings, integers or booleans.
/// Key shapes are only checked where a template walks them: required fields
/// and annotated sequence, mapping or model factories.
pub fn validate_model(schema: &ModelSchema) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in &schema.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                model: schema.name.clone(),
                field: field.name.clone(),
            });
        }

        // Echoed defaults are never walked, so their annotations go unchecked.
        let shape = match &field.default {
            FieldDefault::Required => match field.resolved_shape() {
                Some(shape) => shape,
                None => {
                    return Err(SchemaError::UnresolvedField {
                        model: schema.name.clone(),
                        field: field.name.clone(),
                    });
                }
            },
            FieldDefault::Factory(factory) if factory.is_templatable() => {
                match &field.declared {
                    Some(shape) => shape,
                    None => continue,
                }
            }
            FieldDefault::Factory(_) | FieldDefault::Value(_) => continue,
        };

        let mut bad_key: Option<String> = None;
        Walker::walk(shape, &mut |s| {
            if let Shape::Map(key, _) = s {
                if !key.is_key() && bad_key.is_none() {
                    bad_key = Some(key.to_string());
                }
            }
        });
        if let Some(key) = bad_key {
            return Err(SchemaError::UnsupportedKey {
                model: schema.name.clone(),
                field: field.name.clone(),
                key,
            });
        }
    }
    Ok(())
}
