//! Second-resolution UTC timestamps.
//!
//! On the wire a timestamp is a u32 count of seconds since the Unix epoch, so
//! only 1970-01-01T00:00:00 through 2106-02-07T06:28:15 are representable.
//! In JSON the chain writes `YYYY-MM-DDTHH:MM:SS` with no zone suffix, always
//! meaning UTC.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::{CoreError, WireError};
use crate::wire::{WireDecode, WireDecoder, WireEncode, WireEncoder};

const CHAIN_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// A point in time with whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u32);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Build from signed Unix seconds, failing outside the u32 range.
    pub fn from_unix(secs: i64) -> Result<Self, CoreError> {
        u32::try_from(secs).map(Self).map_err(|_| {
            CoreError::InvalidTimestamp(format!("{secs} is outside 1970..2106"))
        })
    }

    /// Current wall-clock time, truncated to the second.
    pub fn now() -> Result<Self, CoreError> {
        Self::try_from(SystemTime::now())
    }

    pub const fn as_secs(&self) -> u32 {
        self.0
    }

    /// Shift forward, failing if the result leaves the representable range.
    pub fn checked_add(&self, by: Duration) -> Option<Self> {
        let by = u32::try_from(by.as_secs()).ok()?;
        self.0.checked_add(by).map(Self)
    }

    pub fn checked_sub(&self, by: Duration) -> Option<Self> {
        let by = u32::try_from(by.as_secs()).ok()?;
        self.0.checked_sub(by).map(Self)
    }

    fn to_datetime(self) -> OffsetDateTime {
        // Every u32 second count is a valid OffsetDateTime.
        OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(i64::from(self.0))
    }
}

impl TryFrom<SystemTime> for Timestamp {
    type Error = CoreError;

    fn try_from(value: SystemTime) -> Result<Self, Self::Error> {
        let secs = value
            .duration_since(UNIX_EPOCH)
            .map_err(|_| CoreError::InvalidTimestamp("time is before 1970".into()))?
            .as_secs();
        let secs = i64::try_from(secs)
            .map_err(|_| CoreError::InvalidTimestamp("time is after 2106".into()))?;
        Self::from_unix(secs)
    }
}

impl From<Timestamp> for SystemTime {
    fn from(value: Timestamp) -> Self {
        UNIX_EPOCH + Duration::from_secs(u64::from(value.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_datetime().format(CHAIN_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Timestamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Some nodes append a zone designator; it is always UTC.
        let trimmed = s.strip_suffix('Z').unwrap_or(s);
        let parsed = PrimitiveDateTime::parse(trimmed, CHAIN_FORMAT)
            .map_err(|e| CoreError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Self::from_unix(parsed.assume_utc().unix_timestamp())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl WireEncode for Timestamp {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_u32(self.0);
        Ok(())
    }
}

impl WireDecode for Timestamp {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        dec.get_u32().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_no_zone() {
        let ts = Timestamp::from_secs(1_546_300_800);
        assert_eq!(ts.to_string(), "2019-01-01T00:00:00");
    }

    #[test]
    fn test_parse_roundtrip() {
        let ts: Timestamp = "2024-02-29T13:45:07".parse().unwrap();
        assert_eq!(ts.as_secs(), 1_709_214_307);
        assert_eq!(ts.to_string(), "2024-02-29T13:45:07");

        let zoned: Timestamp = "2024-02-29T13:45:07Z".parse().unwrap();
        assert_eq!(zoned, ts);
    }

    #[test]
    fn test_range_limits() {
        assert!("1969-12-31T23:59:59".parse::<Timestamp>().is_err());
        assert!("2106-02-07T06:28:16".parse::<Timestamp>().is_err());
        assert_eq!(
            "2106-02-07T06:28:15".parse::<Timestamp>().unwrap().as_secs(),
            u32::MAX
        );
        assert!(Timestamp::from_unix(-1).is_err());
    }

    #[test]
    fn test_wire_is_u32_le() {
        let ts = Timestamp::from_secs(0x5c2aad80);
        let bytes = crate::wire::to_wire_bytes(&ts).unwrap();
        assert_eq!(bytes, vec![0x80, 0xad, 0x2a, 0x5c]);
    }

    #[test]
    fn test_checked_add() {
        let ts = Timestamp::from_secs(10);
        assert_eq!(ts.checked_add(Duration::from_secs(5)), Some(Timestamp::from_secs(15)));
        assert_eq!(Timestamp::from_secs(u32::MAX).checked_add(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_json_form() {
        let ts = Timestamp::from_secs(1_546_300_800);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2019-01-01T00:00:00\"");
    }
}
