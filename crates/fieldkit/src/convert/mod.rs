//! Per-type converter registries.
//!
//! A [`Convertible`] type declares, in order, one converter per source type
//! it accepts:
//!
//! ```ignore
//! struct ToInt(i64);
//!
//! impl Convertible for ToInt {
//!     fn converters(decl: &mut Converters<Self>) {
//!         decl.add("convert_str", |value: String| value.parse().map(ToInt))
//!             .add("convert_bytes", |value: Vec<u8>| {
//!                 Ok::<_, BoxError>(ToInt(value.iter().fold(0, |n, b| n << 8 | i64::from(*b))))
//!             });
//!     }
//! }
//!
//! let n: ToInt = fieldkit::convert("5".to_string())?;
//! ```
//!
//! The declarations are turned into a [`ConverterRegistry`] the first time
//! the type is used and cached for the rest of the process.

mod cache;
mod registry;
mod signature;

pub use cache::registry;
pub use registry::{ConverterEntry, ConverterRegistry};
pub use signature::{BoxError, ConverterFn, ParamInfo};

use signature::ErasedConverter;

use crate::error::ConversionError;

/// A type that can be produced from one or more source representations.
pub trait Convertible: Sized + 'static {
    /// Declares this type's converters, in definition order.
    fn converters(decl: &mut Converters<Self>);
}

/// Converts `value` into `T` using the converter registered for `S`.
pub fn convert<T: Convertible, S: 'static>(value: S) -> Result<T, ConversionError> {
    registry::<T>()?.convert(value)
}

/// Converter declarations collected from [`Convertible::converters`].
pub struct Converters<T> {
    declared: Vec<Declared<T>>,
}

pub(crate) struct Declared<T> {
    pub(crate) name: String,
    pub(crate) params: Vec<ParamInfo>,
    pub(crate) call: Option<ErasedConverter<T>>,
}

impl<T: 'static> Converters<T> {
    pub(crate) fn new() -> Self {
        Self {
            declared: Vec::new(),
        }
    }

    /// Declares a converter. Its parameter list is checked when the registry
    /// is built, not here.
    pub fn add<Args, F>(&mut self, name: impl Into<String>, converter: F) -> &mut Self
    where
        F: ConverterFn<T, Args>,
    {
        self.declared.push(Declared {
            name: name.into(),
            params: F::params(),
            call: converter.into_unary(),
        });
        self
    }

    pub(crate) fn into_declared(self) -> Vec<Declared<T>> {
        self.declared
    }
}
