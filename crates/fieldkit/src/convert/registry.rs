//! The per-type dispatch table.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use fieldkit_value::{Key, Value};
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::signature::ErasedConverter;
use super::{Convertible, Converters, ParamInfo};
use crate::constants::CONVERTER_METHOD_PREFIX;
use crate::error::{ConversionError, ConverterDefinitionError};

/// One registered converter: the source type it accepts and the function.
pub struct ConverterEntry<T> {
    name: String,
    source: ParamInfo,
    call: ErasedConverter<T>,
}

impl<T> ConverterEntry<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &ParamInfo {
        &self.source
    }
}

impl<T> fmt::Debug for ConverterEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterEntry")
            .field("name", &self.name)
            .field("source", &self.source.type_name)
            .finish()
    }
}

/// Converters of one target type, keyed by the exact source type they accept.
///
/// Entries keep declaration order; lookup is by [`TypeId`], so a converter
/// registered for `String` is never used for `&str` and one registered for
/// `i64` is never used for `i32`.
pub struct ConverterRegistry<T> {
    target: &'static str,
    entries: Vec<ConverterEntry<T>>,
    index: HashMap<TypeId, usize>,
}

impl<T: Convertible> ConverterRegistry<T> {
    /// Collects and checks `T`'s converter declarations.
    ///
    /// This does not consult the process-wide cache; use
    /// [`registry`](super::registry) for that.
    pub fn build() -> Result<Self, ConverterDefinitionError> {
        let target = type_name::<T>();
        let mut decl = Converters::new();
        T::converters(&mut decl);

        let mut entries: Vec<ConverterEntry<T>> = Vec::new();
        let mut index: HashMap<TypeId, usize> = HashMap::new();
        for declared in decl.into_declared() {
            if !declared.name.starts_with(CONVERTER_METHOD_PREFIX) {
                warn!(
                    convertible = target,
                    name = %declared.name,
                    prefix = CONVERTER_METHOD_PREFIX,
                    "skipping declaration without converter prefix"
                );
                continue;
            }

            let arity = declared.params.len();
            let (Ok([source]), Some(call)) =
                (<[ParamInfo; 1]>::try_from(declared.params), declared.call)
            else {
                return Err(ConverterDefinitionError::Arity {
                    target,
                    name: declared.name,
                    arity,
                });
            };

            if let Some(&existing) = index.get(&source.type_id) {
                return Err(ConverterDefinitionError::Duplicate {
                    target,
                    source_type: source.type_name,
                    first: entries[existing].name.clone(),
                    second: declared.name,
                });
            }

            index.insert(source.type_id, entries.len());
            entries.push(ConverterEntry {
                name: declared.name,
                source,
                call,
            });
        }

        debug!(convertible = target, converters = entries.len(), "built converter registry");
        Ok(Self {
            target,
            entries,
            index,
        })
    }
}

impl<T: 'static> ConverterRegistry<T> {
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[ConverterEntry<T>] {
        &self.entries
    }

    /// Source parameter of the first-declared converter.
    pub fn first_source(&self) -> Option<&ParamInfo> {
        self.entries.first().map(ConverterEntry::source)
    }

    /// Whether a converter accepts exactly `type_id`.
    pub fn accepts(&self, type_id: TypeId) -> bool {
        self.index.contains_key(&type_id)
    }

    /// Looks up the converter for the exact source type `type_id`.
    pub fn lookup(&self, type_id: TypeId) -> Option<&ConverterEntry<T>> {
        self.index.get(&type_id).map(|&idx| &self.entries[idx])
    }

    /// Converts a statically typed value.
    pub fn convert<S: 'static>(&self, value: S) -> Result<T, ConversionError> {
        self.dispatch(Box::new(value), || type_name::<S>().to_string())
    }

    /// Converts a type-erased value, dispatching on its concrete type.
    ///
    /// A boxed value carries no type name, so a miss reports its type id.
    pub fn convert_any(&self, value: Box<dyn Any>) -> Result<T, ConversionError> {
        let type_id = (*value).type_id();
        self.dispatch(value, || format!("<unnamed type with {type_id:?}>"))
    }

    /// Converts a dynamic [`Value`].
    ///
    /// The value is first unpacked into its natural Rust type (`Str` as
    /// `String`, `Int` as `i64`, `Float` as `f64`, `Bool` as `bool`, `Seq` as
    /// `Vec<Value>`, `Map` as `IndexMap<Key, Value>`, `Null` as `()`), and
    /// dispatch then follows that type.
    pub fn convert_value(&self, value: Value) -> Result<T, ConversionError> {
        match value {
            Value::Null => self.convert(()),
            Value::Bool(b) => self.convert(b),
            Value::Int(i) => self.convert(i),
            Value::Float(f) => self.convert(f),
            Value::Str(s) => self.convert(s),
            Value::Seq(items) => self.convert(items),
            Value::Map(map) => self.convert::<IndexMap<Key, Value>>(map),
        }
    }

    fn dispatch(
        &self,
        value: Box<dyn Any>,
        source_type: impl FnOnce() -> String,
    ) -> Result<T, ConversionError> {
        let type_id = (*value).type_id();
        let Some(entry) = self.lookup(type_id) else {
            return Err(ConversionError::NoConverter {
                target: self.target,
                source_type: source_type(),
            });
        };
        (entry.call)(value).map_err(|source| ConversionError::Failed {
            target: self.target,
            name: entry.name.clone(),
            source,
        })
    }
}

impl<T> fmt::Debug for ConverterRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("target", &self.target)
            .field("entries", &self.entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::BoxError;
    use crate::shape::Shape;

    #[derive(Debug, PartialEq)]
    struct Celsius(f64);

    impl Convertible for Celsius {
        fn converters(decl: &mut Converters<Self>) {
            decl.add("convert_f64", |v: f64| Ok::<_, BoxError>(Celsius(v)))
                .add("convert_str", |v: String| {
                    v.trim_end_matches('C').parse::<f64>().map(Celsius)
                })
                .add("from_kelvin", |v: i64| {
                    Ok::<_, BoxError>(Celsius(v as f64 - 273.15))
                });
        }
    }

    #[test]
    fn builds_in_declaration_order_skipping_unmarked() {
        let registry = ConverterRegistry::<Celsius>::build().unwrap();
        let names: Vec<_> = registry.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["convert_f64", "convert_str"]);
        assert_eq!(registry.first_source().unwrap().shape, Shape::Float);
        assert!(!registry.accepts(TypeId::of::<i64>()));
    }

    #[test]
    fn dispatches_on_exact_type() {
        let registry = ConverterRegistry::<Celsius>::build().unwrap();
        assert_eq!(registry.convert(21.5f64).unwrap(), Celsius(21.5));
        assert_eq!(registry.convert("30C".to_string()).unwrap(), Celsius(30.0));
        assert!(matches!(
            registry.convert(21.5f32),
            Err(ConversionError::NoConverter { source_type, .. }) if source_type == "f32"
        ));
        assert!(matches!(
            registry.convert("30C"),
            Err(ConversionError::NoConverter { .. })
        ));
    }

    #[test]
    fn dynamic_values_unpack_before_dispatch() {
        let registry = ConverterRegistry::<Celsius>::build().unwrap();
        assert_eq!(
            registry.convert_value(Value::from("12")).unwrap(),
            Celsius(12.0)
        );
        assert_eq!(
            registry.convert_value(Value::Float(3.0)).unwrap(),
            Celsius(3.0)
        );
        assert!(registry.convert_value(Value::Int(3)).is_err());
    }

    #[test]
    fn converter_failure_is_wrapped() {
        let registry = ConverterRegistry::<Celsius>::build().unwrap();
        let err = registry.convert("warm".to_string()).unwrap_err();
        assert!(matches!(&err, ConversionError::Failed { name, .. } if name == "convert_str"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn erased_miss_reports_type_id() {
        let registry = ConverterRegistry::<Celsius>::build().unwrap();
        let value: Box<dyn Any> = Box::new(7u8);
        let err = registry.convert_any(value).unwrap_err();
        let expected = format!("<unnamed type with {:?}>", TypeId::of::<u8>());
        assert!(matches!(
            err,
            ConversionError::NoConverter { source_type, .. } if source_type == expected
        ));
    }
}
