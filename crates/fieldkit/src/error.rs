//! Error types.

use thiserror::Error;

use crate::convert::BoxError;

/// A converter declaration is malformed.
///
/// Raised while a type's registry is built; the failure is cached with the
/// type, so every later lookup sees the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConverterDefinitionError {
    #[error("converter `{name}` on `{target}` must take exactly one argument, found {arity}")]
    Arity {
        target: &'static str,
        name: String,
        arity: usize,
    },
    #[error(
        "duplicate converter for type `{source_type}` on `{target}`: `{first}` and `{second}`"
    )]
    Duplicate {
        target: &'static str,
        source_type: &'static str,
        first: String,
        second: String,
    },
    #[error("converter type `{target}` has no converter methods")]
    Empty { target: &'static str },
}

/// A value could not be converted into a target type.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("no converter for type `{source_type}` on `{target}`")]
    NoConverter {
        target: &'static str,
        source_type: String,
    },
    #[error("converter `{name}` on `{target}` failed: {source}")]
    Failed {
        target: &'static str,
        name: String,
        #[source]
        source: BoxError,
    },
    #[error(transparent)]
    Definition(#[from] ConverterDefinitionError),
}

/// A model schema cannot be turned into a template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field `{field}` of `{model}` has no resolvable type")]
    UnresolvedField { model: String, field: String },
    #[error("field `{field}` is declared more than once on `{model}`")]
    DuplicateField { model: String, field: String },
    #[error("field `{field}` of `{model}` uses unsupported mapping key type `{key}`")]
    UnsupportedKey {
        model: String,
        field: String,
        key: String,
    },
    #[error("`{name}` nests itself without a base case: {path}")]
    Recursive { name: String, path: String },
    #[error(transparent)]
    Converter(#[from] ConverterDefinitionError),
}
