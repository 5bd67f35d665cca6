//! Shape walker.

use super::Shape;

/// Walks a shape tree, calling the visitor for every node.
///
/// Model and convertible references are visited but not resolved: their
/// contents belong to another type's schema.
pub struct Walker;

impl Walker {
    pub fn walk(shape: &Shape, on_shape: &mut dyn FnMut(&Shape)) {
        on_shape(shape);
        match shape {
            Shape::Seq(item) => Self::walk(item, on_shape),
            Shape::Map(key, value) => {
                Self::walk(key, on_shape);
                Self::walk(value, on_shape);
            }
            Shape::Str
            | Shape::Int
            | Shape::Float
            | Shape::Bool
            | Shape::Any
            | Shape::Model(_)
            | Shape::Convertible(_) => {}
        }
    }
}
