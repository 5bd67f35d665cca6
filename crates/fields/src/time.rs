//! Human-friendly time parsing.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use regex::Regex;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("`{0}` is not a time of day")]
    InvalidTime(String),
    #[error("time {hour}:{minute:02} is out of range")]
    OutOfRange { hour: u32, minute: u32 },
    #[error("hour {0} is a 24-hour time and cannot take AM or PM")]
    MeridiemOn24Hour(u32),
    #[error("`{0}` is not a duration")]
    InvalidDuration(String),
    #[error("duration `{0}` does not fit in a time delta")]
    DurationOverflow(String),
    #[error("`{0}` is not a date or date-time")]
    InvalidDateTime(String),
}

static TIME_PATTERN: OnceLock<Regex> = OnceLock::new();
static CLOCK_PATTERN: OnceLock<Regex> = OnceLock::new();
static UNIT_PATTERN: OnceLock<Regex> = OnceLock::new();
static SECONDS_PATTERN: OnceLock<Regex> = OnceLock::new();

fn time_pattern() -> &'static Regex {
    TIME_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?P<hour>[0-2]?\d)(?::?(?P<minute>\d{2}))?\s*(?:(?P<am>am|a)|(?P<pm>pm|p))?$")
            .expect("invalid time regex")
    })
}

fn clock_pattern() -> &'static Regex {
    CLOCK_PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<a>\d+):(?P<b>\d{1,2})(?::(?P<c>\d{1,2}(?:\.\d+)?))?$")
            .expect("invalid clock regex")
    })
}

fn seconds_pattern() -> &'static Regex {
    SECONDS_PATTERN
        .get_or_init(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("invalid seconds regex"))
}

/// Unit alternatives are longest-first so `min` wins over `m`; terms may be
/// written back to back (`1h30m`).
fn unit_pattern() -> &'static Regex {
    UNIT_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)(?P<n>\d+(?:\.\d+)?|\.\d+)\s*(?P<unit>weeks?|wks?|w|days?|d|hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s)",
        )
        .expect("invalid duration unit regex")
    })
}

/// Parses a time of day such as `"9"`, `"0930"`, `"9:30 am"` or `"12 PM"`.
///
/// Without a meridiem the hour is read as a 24-hour clock. 12 AM is
/// midnight and 12 PM is noon.
pub fn parse_time(input: &str) -> Result<NaiveTime, TimeParseError> {
    let caps = time_pattern()
        .captures(input.trim())
        .ok_or_else(|| TimeParseError::InvalidTime(input.to_string()))?;

    let mut hour: u32 = caps["hour"]
        .parse()
        .map_err(|_| TimeParseError::InvalidTime(input.to_string()))?;
    let minute: u32 = match caps.name("minute") {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| TimeParseError::InvalidTime(input.to_string()))?,
        None => 0,
    };

    if hour > 23 || minute > 59 {
        return Err(TimeParseError::OutOfRange { hour, minute });
    }

    let pm = caps.name("pm").is_some();
    if pm || caps.name("am").is_some() {
        hour = match hour {
            12 if pm => 12,
            12 => 0,
            h if h < 12 && pm => h + 12,
            h if h < 12 => h,
            h => return Err(TimeParseError::MeridiemOn24Hour(h)),
        };
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TimeParseError::OutOfRange { hour, minute })
}

/// Parses a duration.
///
/// Accepted forms:
/// - bare seconds: `"32"`, `"1.5"`;
/// - a clock: `"1:30"` (minutes and seconds), `"1:02:03"` (hours, minutes, seconds);
/// - unit terms: `"1w 2d 3h 4m 5s"`, `"1h30m"`, `"1.5 hours"`,
///   `"10 minutes, 5 seconds"`.
///
/// Exponent notation (`"1e3"`) is not a number of seconds.
///
/// A leading `-` negates the result.
pub fn parse_duration(input: &str) -> Result<TimeDelta, TimeParseError> {
    let invalid = || TimeParseError::InvalidDuration(input.to_string());

    let trimmed = input.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim_start()),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed).trim_start()),
    };
    if body.is_empty() {
        return Err(invalid());
    }

    let seconds = if seconds_pattern().is_match(body) {
        body.parse::<f64>().map_err(|_| invalid())?
    } else if let Some(caps) = clock_pattern().captures(body) {
        clock_seconds(&caps).ok_or_else(invalid)?
    } else {
        unit_seconds(body).ok_or_else(invalid)?
    };
    if !seconds.is_finite() {
        return Err(invalid());
    }

    let millis = (sign * seconds * 1000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return Err(TimeParseError::DurationOverflow(input.to_string()));
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)
        .ok_or_else(|| TimeParseError::DurationOverflow(input.to_string()))?;
    trace!(input, seconds = delta.num_seconds(), "parsed duration");
    Ok(delta)
}

fn clock_seconds(caps: &regex::Captures<'_>) -> Option<f64> {
    let a: f64 = caps["a"].parse().ok()?;
    let b: f64 = caps["b"].parse().ok()?;
    match caps.name("c") {
        Some(c) => {
            let c: f64 = c.as_str().parse().ok()?;
            (b < 60.0 && c < 60.0).then_some(a * 3600.0 + b * 60.0 + c)
        }
        None => (b < 60.0).then_some(a * 60.0 + b),
    }
}

fn unit_seconds(body: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut last = 0;
    let mut matched = false;
    for caps in unit_pattern().captures_iter(body) {
        let whole = caps.get(0)?;
        if !is_separator(&body[last..whole.start()]) {
            return None;
        }
        let n: f64 = caps["n"].parse().ok()?;
        total += n * unit_scale(&caps["unit"])?;
        last = whole.end();
        matched = true;
    }
    (matched && is_separator(&body[last..])).then_some(total)
}

fn is_separator(gap: &str) -> bool {
    let gap = gap.trim_matches(|c: char| c.is_whitespace() || c == ',');
    gap.is_empty() || gap.eq_ignore_ascii_case("and")
}

fn unit_scale(unit: &str) -> Option<f64> {
    let unit = unit.to_ascii_lowercase();
    let scale = match unit.as_str() {
        "w" | "wk" | "wks" | "week" | "weeks" => 604_800.0,
        "d" | "day" | "days" => 86_400.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60.0,
        "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        _ => return None,
    };
    Some(scale)
}

/// Parses an RFC 3339 timestamp, a date-time without offset (read as UTC),
/// or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeParseError::InvalidDateTime(input.to_string()))
}
