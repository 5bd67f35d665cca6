//! Dynamic value tree for fieldkit.
//!
//! Templates synthesized from a model schema, literal field defaults and
//! dynamically typed converter input are all expressed as [`Value`]s.
//! Mappings are insertion-ordered and may carry non-string keys ([`Key`]),
//! which is what lets a `dict[int, str]` placeholder keep its `0` key.

mod json;
mod key;
mod to_value;
mod value;

pub use key::{Key, ToKey};
pub use to_value::ToValue;
pub use value::Value;
