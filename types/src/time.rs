//! Timestamp type used throughout the pipeline.
//!
//! Timestamps are UTC instants with microsecond precision, serialized as
//! ISO-8601 strings (`2026-01-01T00:00:00.000000Z`). A timestamp is produced
//! once per logical event through a [`Clock`] and never recomputed on read,
//! so the string form is stable across store and retrieve.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A UTC instant in microseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000))
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_micros())
    }

    pub fn as_micros(&self) -> i64 {
        self.0
    }

    /// ISO-8601 rendering with microsecond precision and a `Z` suffix.
    pub fn to_iso8601(&self) -> String {
        match DateTime::<Utc>::from_timestamp_micros(self.0) {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Micros, true),
            // Out of chrono's range; fall back to the raw count so the value stays stable.
            None => format!("@{}us", self.0),
        }
    }

    pub fn parse_iso8601(s: &str) -> Result<Self, TypesError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| TypesError::InvalidTimestamp(format!("{s}: {e}")))?;
        Ok(Self(dt.with_timezone(&Utc).timestamp_micros()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for Timestamp {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso8601(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_iso8601(&s).map_err(serde::de::Error::custom)
    }
}

/// Source of the current time. Injected so tests can pin timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_renders_as_iso8601() {
        assert_eq!(Timestamp::EPOCH.to_iso8601(), "1970-01-01T00:00:00.000000Z");
    }

    #[test]
    fn iso8601_round_trip_is_exact() {
        let ts = Timestamp::from_micros(1_767_225_600_123_456);
        let parsed: Timestamp = ts.to_iso8601().parse().unwrap();
        assert_eq!(parsed, ts);
        assert_eq!(parsed.to_iso8601(), ts.to_iso8601());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse_iso8601("yesterday").is_err());
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now() > Timestamp::EPOCH);
    }
}
