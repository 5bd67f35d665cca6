//! Process-wide constants.

/// Key used for the single placeholder entry of a `dict[str, V]` field.
pub const PLACEHOLDER_DICT_KEY: &str = "KEY_NAME";

/// Name prefix that marks a declared function as a converter.
///
/// `convert`, `convert_str` and `convert_from_seconds` all qualify.
pub const CONVERTER_METHOD_PREFIX: &str = "convert";
