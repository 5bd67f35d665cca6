//! Mapping keys.

use std::fmt;

/// A mapping key.
///
/// Only hashable scalars can key a [`crate::Value::Map`]; there is no float
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Key {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "str",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Lowers a Rust map key into a [`Key`].
pub trait ToKey {
    fn to_key(&self) -> Key;
}

impl ToKey for Key {
    fn to_key(&self) -> Key {
        self.clone()
    }
}

impl ToKey for String {
    fn to_key(&self) -> Key {
        Key::Str(self.clone())
    }
}

impl ToKey for str {
    fn to_key(&self) -> Key {
        Key::Str(self.to_string())
    }
}

impl ToKey for &str {
    fn to_key(&self) -> Key {
        Key::Str((*self).to_string())
    }
}

impl ToKey for bool {
    fn to_key(&self) -> Key {
        Key::Bool(*self)
    }
}

macro_rules! int_key {
    ($($ty:ty),*) => {
        $(
            impl ToKey for $ty {
                fn to_key(&self) -> Key {
                    Key::Int(i64::from(*self))
                }
            }
        )*
    };
}

int_key!(i8, i16, i32, i64, u8, u16, u32);
