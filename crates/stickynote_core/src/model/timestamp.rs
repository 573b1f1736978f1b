//! Timestamp source and ISO-8601 wire encoding.
//!
//! # Invariants
//! - `SystemClock` yields millisecond-precise UTC instants.
//! - `parse_iso8601(&format_iso8601(t)) == t` for every `t`.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Source of "now" for store mutations.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock truncated to milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Formats an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// Instants carrying sub-millisecond precision keep every significant digit.
pub fn format_iso8601(value: &DateTime<Utc>) -> String {
    let format = if value.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    value.to_rfc3339_opts(format, true)
}

/// Parses RFC 3339 / ISO-8601 text with any offset into UTC.
pub fn parse_iso8601(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|value| value.with_timezone(&Utc))
}

/// `#[serde(with = "iso8601")]` adapter for note timestamps.
pub mod iso8601 {
    use super::{format_iso8601, parse_iso8601};
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso8601(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_iso8601(&raw)
            .map_err(|err| de::Error::custom(format!("invalid timestamp `{raw}`: {err}")))
    }
}
