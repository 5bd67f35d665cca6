//! Static type introspection: Rust type → [`Shape`].

use std::collections::{BTreeMap, HashMap, VecDeque};

use fieldkit_value::Value;
use indexmap::IndexMap;

use super::Shape;

/// Describes the shape of a Rust type.
///
/// Implemented here for scalars and std containers. Model types implement it
/// as `Shape::model::<Self>()` and convertible wrappers as
/// `Shape::convertible::<Self>()`.
pub trait Describe {
    fn shape() -> Shape;
}

macro_rules! describe_as {
    ($shape:expr => $($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape {
                    $shape
                }
            }
        )*
    };
}

describe_as!(Shape::Str => String, str, &str, char);
describe_as!(Shape::Int => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_as!(Shape::Float => f32, f64);
describe_as!(Shape::Bool => bool);
describe_as!(Shape::Any => Value, ());

/// `Option<T>` describes as `T`: the placeholder shows what a present value
/// looks like.
impl<T: Describe> Describe for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape {
        Shape::seq(T::shape())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape() -> Shape {
        Shape::seq(T::shape())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }
}

impl<K: Describe, V: Describe, S> Describe for IndexMap<K, V, S> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(<&str>::shape(), Shape::Str);
        assert_eq!(u16::shape(), Shape::Int);
        assert_eq!(f32::shape(), Shape::Float);
        assert_eq!(Value::shape(), Shape::Any);
    }

    #[test]
    fn containers() {
        assert_eq!(
            <Vec<Option<bool>>>::shape(),
            Shape::seq(Shape::Bool)
        );
        assert_eq!(
            <BTreeMap<String, Vec<i64>>>::shape(),
            Shape::map(Shape::Str, Shape::seq(Shape::Int))
        );
    }
}
