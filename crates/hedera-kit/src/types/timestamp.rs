//! ISO-8601 instants and mirror-node consensus timestamps.

use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseTimestampError;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// An ISO-8601 (RFC 3339) instant, normalized to UTC.
///
/// ```
/// use hedera_kit::Timestamp;
///
/// let ts: Timestamp = "2024-05-01T12:30:00+02:00".parse().unwrap();
/// assert_eq!(ts.to_string(), "2024-05-01T10:30:00Z");
/// assert!("yesterday".parse::<Timestamp>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a UTC datetime.
    pub const fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Borrow the underlying datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|_| ParseTimestampError::InvalidIso8601(s.to_string()))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// ConsensusTimestamp
// ============================================================================

/// A consensus timestamp in the mirror-node `seconds.nanos` form.
///
/// Fewer than nine fractional digits are accepted and scaled
/// (`"1.5"` is 1 second and 500,000,000 nanos); display always prints nine.
///
/// ```
/// use hedera_kit::ConsensusTimestamp;
///
/// let ts: ConsensusTimestamp = "1700000000.000000123".parse().unwrap();
/// assert_eq!(ts.seconds, 1_700_000_000);
/// assert_eq!(ts.nanos, 123);
/// assert_eq!(ts.to_string(), "1700000000.000000123");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConsensusTimestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: u64,
    /// Nanoseconds within the second.
    pub nanos: u32,
}

impl ConsensusTimestamp {
    /// Create from parts, or `None` if `nanos` is a second or more.
    pub const fn new(seconds: u64, nanos: u32) -> Option<Self> {
        if nanos >= NANOS_PER_SECOND {
            return None;
        }
        Some(Self { seconds, nanos })
    }

    /// Total nanoseconds since the epoch.
    pub fn as_nanos(&self) -> u128 {
        u128::from(self.seconds) * u128::from(NANOS_PER_SECOND) + u128::from(self.nanos)
    }

    /// Convert to an ISO-8601 [`Timestamp`].
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        let seconds = i64::try_from(self.seconds).ok()?;
        DateTime::from_timestamp(seconds, self.nanos).map(Timestamp)
    }
}

impl FromStr for ConsensusTimestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (secs, frac) = match s.split_once('.') {
            Some((secs, frac)) => (secs, Some(frac)),
            None => (s, None),
        };

        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(secs) || frac.is_some_and(|f| !is_digits(f)) {
            return Err(ParseTimestampError::InvalidFormat(s.to_string()));
        }

        let seconds: u64 = secs
            .parse()
            .map_err(|_| ParseTimestampError::OutOfRange(s.to_string()))?;

        let nanos = match frac {
            None => 0,
            Some(frac) if frac.len() > 9 => {
                return Err(ParseTimestampError::TooPrecise(s.to_string()));
            }
            Some(frac) => {
                let value: u32 = frac
                    .parse()
                    .map_err(|_| ParseTimestampError::InvalidFormat(s.to_string()))?;
                value * 10u32.pow(9 - frac.len() as u32)
            }
        };

        Ok(Self { seconds, nanos })
    }
}

impl Display for ConsensusTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

impl Serialize for ConsensusTimestamp {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConsensusTimestamp {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Timestamp tests
    // ========================================================================

    #[test]
    fn test_timestamp_parse_utc() {
        let ts: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(ts.unix_seconds(), 1_704_067_200);
        assert_eq!(ts.to_string(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_timestamp_parse_fractional() {
        let ts: Timestamp = "2024-01-01T00:00:00.250Z".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-01-01T00:00:00.250Z");
    }

    #[test]
    fn test_timestamp_normalizes_offset() {
        let a: Timestamp = "2024-01-01T02:00:00+02:00".parse().unwrap();
        let b: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_timestamp_invalid() {
        assert!(matches!(
            "2024-13-01T00:00:00Z".parse::<Timestamp>(),
            Err(ParseTimestampError::InvalidIso8601(_))
        ));
        assert!("".parse::<Timestamp>().is_err());
        assert!("1700000000".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_timestamp_serde_roundtrip() {
        let ts: Timestamp = "2023-11-14T22:13:20Z".parse().unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2023-11-14T22:13:20Z\"");
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }

    // ========================================================================
    // ConsensusTimestamp tests
    // ========================================================================

    #[test]
    fn test_consensus_parse() {
        let ts: ConsensusTimestamp = "1700000000.123456789".parse().unwrap();
        assert_eq!(ts.seconds, 1_700_000_000);
        assert_eq!(ts.nanos, 123_456_789);
    }

    #[test]
    fn test_consensus_parse_short_fraction() {
        let ts: ConsensusTimestamp = "12.5".parse().unwrap();
        assert_eq!(ts.nanos, 500_000_000);
        assert_eq!(ts.to_string(), "12.500000000");
    }

    #[test]
    fn test_consensus_parse_whole_seconds() {
        let ts: ConsensusTimestamp = "12".parse().unwrap();
        assert_eq!(ts, ConsensusTimestamp::new(12, 0).unwrap());
    }

    #[test]
    fn test_consensus_parse_invalid() {
        assert!(matches!(
            "abc".parse::<ConsensusTimestamp>(),
            Err(ParseTimestampError::InvalidFormat(_))
        ));
        assert!("1.".parse::<ConsensusTimestamp>().is_err());
        assert!(".1".parse::<ConsensusTimestamp>().is_err());
        assert!("-1.0".parse::<ConsensusTimestamp>().is_err());
        assert!(matches!(
            "1.0000000001".parse::<ConsensusTimestamp>(),
            Err(ParseTimestampError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_consensus_new_rejects_overflowing_nanos() {
        assert!(ConsensusTimestamp::new(1, 999_999_999).is_some());
        assert!(ConsensusTimestamp::new(1, 1_000_000_000).is_none());
    }

    #[test]
    fn test_consensus_to_timestamp() {
        let ts = ConsensusTimestamp::new(1_704_067_200, 0).unwrap();
        assert_eq!(ts.to_timestamp().unwrap().to_string(), "2024-01-01T00:00:00Z");
        assert_eq!(ts.as_nanos(), 1_704_067_200_000_000_000);
    }

    #[test]
    fn test_consensus_ordering() {
        let a: ConsensusTimestamp = "10.000000001".parse().unwrap();
        let b: ConsensusTimestamp = "10.5".parse().unwrap();
        let c: ConsensusTimestamp = "11".parse().unwrap();
        assert!(a < b && b < c);
    }
}
