//! Converter signatures.
//!
//! [`ConverterFn`] is implemented for closures of zero to three arguments so
//! that a declaration's parameter list can be inspected when the registry is
//! built. Only single-argument converters can be dispatched to.

use std::any::{type_name, Any, TypeId};

use crate::shape::{Describe, Shape};

/// Error type returned by user converters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub(crate) type ErasedConverter<T> =
    Box<dyn Fn(Box<dyn Any>) -> Result<T, BoxError> + Send + Sync>;

/// One declared converter parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub shape: Shape,
}

impl ParamInfo {
    pub fn of<A: Describe + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<A>(),
            type_name: type_name::<A>(),
            shape: A::shape(),
        }
    }
}

/// A function that may serve as a converter into `T`.
///
/// `Args` is the tuple of parameter types and only exists to keep the
/// implementations for different arities apart.
pub trait ConverterFn<T, Args>: Send + Sync + Sized + 'static {
    /// The declared parameters, in order.
    fn params() -> Vec<ParamInfo>;

    /// Type-erases a single-argument converter; `None` for any other arity.
    fn into_unary(self) -> Option<ErasedConverter<T>>;
}

impl<T, F, E> ConverterFn<T, ()> for F
where
    T: 'static,
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    fn params() -> Vec<ParamInfo> {
        Vec::new()
    }

    fn into_unary(self) -> Option<ErasedConverter<T>> {
        None
    }
}

impl<T, F, A, E> ConverterFn<T, (A,)> for F
where
    T: 'static,
    F: Fn(A) -> Result<T, E> + Send + Sync + 'static,
    A: Describe + 'static,
    E: Into<BoxError>,
{
    fn params() -> Vec<ParamInfo> {
        vec![ParamInfo::of::<A>()]
    }

    fn into_unary(self) -> Option<ErasedConverter<T>> {
        Some(Box::new(move |value: Box<dyn Any>| {
            let value = value
                .downcast::<A>()
                .map_err(|_| BoxError::from(format!("expected `{}`", type_name::<A>())))?;
            (self)(*value).map_err(Into::into)
        }))
    }
}

macro_rules! non_unary {
    ($($arg:ident),+) => {
        impl<T, F, E, $($arg),+> ConverterFn<T, ($($arg,)+)> for F
        where
            T: 'static,
            F: Fn($($arg),+) -> Result<T, E> + Send + Sync + 'static,
            E: Into<BoxError>,
            $($arg: Describe + 'static,)+
        {
            fn params() -> Vec<ParamInfo> {
                vec![$(ParamInfo::of::<$arg>()),+]
            }

            fn into_unary(self) -> Option<ErasedConverter<T>> {
                None
            }
        }
    };
}

non_unary!(A, B);
non_unary!(A, B, C);
