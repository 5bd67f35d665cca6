//! Convertible time fields.
//!
//! Each wrapper's first converter takes a `String`, so a template renders the
//! field as its upper-cased name.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use fieldkit::{BoxError, Converters, Convertible, Describe, Shape, ToValue, Value};

use crate::time::{parse_datetime, parse_duration, parse_time, TimeParseError};

macro_rules! field_wrapper {
    ($name:ident, $inner:ty) => {
        impl Deref for $name {
            type Target = $inner;

            fn deref(&self) -> &$inner {
                &self.0
            }
        }

        impl From<$inner> for $name {
            fn from(inner: $inner) -> Self {
                Self(inner)
            }
        }

        impl Describe for $name {
            fn shape() -> Shape {
                Shape::convertible::<Self>()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// DateTimeField

/// A UTC timestamp, from an ISO 8601 / RFC 3339 string or Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeField(pub DateTime<Utc>);

field_wrapper!(DateTimeField, DateTime<Utc>);

impl Convertible for DateTimeField {
    fn converters(decl: &mut Converters<Self>) {
        decl.add("convert", |value: String| value.parse::<Self>())
            .add("convert_timestamp", |secs: i64| {
                DateTime::from_timestamp(secs, 0)
                    .map(Self)
                    .ok_or_else(|| BoxError::from(format!("timestamp {secs} is out of range")))
            });
    }
}

impl FromStr for DateTimeField {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_datetime(s).map(Self)
    }
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl ToValue for DateTimeField {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

// ---------------------------------------------------------------------------
// TimeField

/// A time of day, from strings like `"9:30 pm"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeField(pub NaiveTime);

field_wrapper!(TimeField, NaiveTime);

impl Convertible for TimeField {
    fn converters(decl: &mut Converters<Self>) {
        decl.add("convert", |value: String| value.parse::<Self>());
    }
}

impl FromStr for TimeField {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s).map(Self)
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl ToValue for TimeField {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

// ---------------------------------------------------------------------------
// DurationField

/// A span of time, from strings like `"1h 30m"` or a number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DurationField(pub TimeDelta);

field_wrapper!(DurationField, TimeDelta);

impl Convertible for DurationField {
    fn converters(decl: &mut Converters<Self>) {
        decl.add("convert", |value: String| value.parse::<Self>())
            .add("convert_seconds", |secs: i64| {
                TimeDelta::try_seconds(secs)
                    .map(Self)
                    .ok_or_else(|| BoxError::from(format!("{secs} seconds is out of range")))
            });
    }
}

impl FromStr for DurationField {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(Self)
    }
}

/// Renders as seconds, with a fractional part only when needed.
impl ToValue for DurationField {
    fn to_value(&self) -> Value {
        let millis = self.0.num_milliseconds();
        if millis % 1000 == 0 {
            Value::Int(millis / 1000)
        } else {
            Value::Float(millis as f64 / 1000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldkit::{convert, registry, ConversionError};

    #[test]
    fn first_converter_takes_strings() {
        for first in [
            registry::<DateTimeField>().unwrap().first_source().cloned(),
            registry::<TimeField>().unwrap().first_source().cloned(),
            registry::<DurationField>().unwrap().first_source().cloned(),
        ] {
            assert_eq!(first.unwrap().shape, Shape::Str);
        }
    }

    #[test]
    fn converts_strings() {
        let t: TimeField = convert("9:30 pm".to_string()).unwrap();
        assert_eq!(t.to_string(), "21:30");

        let d: DurationField = convert("1h 30m".to_string()).unwrap();
        assert_eq!(d.num_minutes(), 90);

        let dt: DateTimeField = convert("2024-03-01".to_string()).unwrap();
        assert_eq!(dt.to_string(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn converts_numbers() {
        let d: DurationField = convert(90i64).unwrap();
        assert_eq!(d.to_value(), Value::Int(90));

        let dt: DateTimeField = convert(0i64).unwrap();
        assert_eq!(dt.timestamp(), 0);

        assert!(matches!(
            convert::<TimeField, _>(930i64),
            Err(ConversionError::NoConverter { .. })
        ));
    }

    #[test]
    fn parse_failures_surface_as_conversion_errors() {
        let err = convert::<TimeField, _>("25:00".to_string()).unwrap_err();
        assert!(matches!(err, ConversionError::Failed { .. }));
        assert!(err.to_string().contains("TimeField"));
    }

    #[test]
    fn fractional_duration_value() {
        let d: DurationField = "1.5".parse().unwrap();
        assert_eq!(d.to_value(), Value::Float(1.5));
    }
}
