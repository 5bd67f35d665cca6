//! Ready-made fields for fieldkit models.
//!
//! - [`time`]: parsing of times of day, durations and timestamps;
//! - [`DateTimeField`], [`TimeField`], [`DurationField`]: [`Convertible`](fieldkit::Convertible)
//!   wrappers built on those parsers;
//! - [`instance_list_factory`]: a default factory for single-instance lists.

mod factory;
pub mod time;
mod time_fields;

pub use factory::instance_list_factory;
pub use time::{parse_datetime, parse_duration, parse_time, TimeParseError};
pub use time_fields::{DateTimeField, DurationField, TimeField};
