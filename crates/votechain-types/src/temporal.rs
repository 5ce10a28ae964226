use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::TypeError;

/// `0000-01-01T00:00:00Z`, the earliest instant with a four-digit year.
pub const MIN_UNIX_SECS: i64 = -62_167_219_200;

/// `9999-12-31T23:59:59Z`, the latest whole second with a four-digit year.
pub const MAX_UNIX_SECS: i64 = 253_402_300_799;

/// Wall-clock creation time of an entry.
///
/// Informational only: the chain never orders or validates by time. The
/// timestamp is, however, part of every hash preimage, so it has exactly one
/// text rendering: RFC 3339 in UTC with nine fractional-second digits and a
/// `Z` suffix (`2024-01-02T03:04:05.123456789Z`). That rendering is what
/// [`fmt::Display`] and serde produce, and parsing it back yields an equal
/// value. Construction is limited to years 0000 through 9999, the range
/// that form can express.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build from seconds and nanoseconds since the UNIX epoch.
    pub fn from_unix(secs: i64, nanos: u32) -> Result<Self, TypeError> {
        let out_of_range = || TypeError::InvalidTimestamp {
            input: format!("{secs}.{nanos:09}"),
            reason: "out of range".into(),
        };
        if nanos >= 1_000_000_000 {
            return Err(out_of_range());
        }
        DateTime::from_timestamp(secs, nanos)
            .ok_or_else(out_of_range)
            .and_then(Self::try_from)
    }

    /// Parse any RFC 3339 timestamp, normalizing the offset to UTC.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| TypeError::InvalidTimestamp {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Self::try_from(dt.with_timezone(&Utc))
    }

    /// The canonical text form used in hash preimages and on the wire.
    pub fn to_canonical(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = TypeError;

    fn try_from(dt: DateTime<Utc>) -> Result<Self, Self::Error> {
        if !(MIN_UNIX_SECS..=MAX_UNIX_SECS).contains(&dt.timestamp()) {
            return Err(TypeError::InvalidTimestamp {
                input: dt.to_rfc3339(),
                reason: "year outside 0000..=9999".into(),
            });
        }
        Ok(Self(dt))
    }
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.to_canonical())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
