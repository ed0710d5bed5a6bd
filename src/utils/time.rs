use crate::error::{EconomicsError, Result};
use chrono::{DateTime, Utc};

const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// A block/event timestamp with its UTC day and hour buckets.
///
/// Truncation is done in UTC so bucket keys do not depend on the host time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcTimestamp {
    secs: u64,
    at: DateTime<Utc>,
    hour: DateTime<Utc>,
    day: DateTime<Utc>,
}

impl UtcTimestamp {
    pub fn from_secs(secs: u64) -> Result<UtcTimestamp> {
        let out_of_range =
            || EconomicsError::MalformedPayload(format!("Timestamp out of range: {secs}"));

        let signed = i64::try_from(secs).map_err(|_| out_of_range())?;
        let at = DateTime::from_timestamp(signed, 0).ok_or_else(out_of_range)?;
        let hour = DateTime::from_timestamp(signed - signed % SECS_PER_HOUR, 0)
            .ok_or_else(out_of_range)?;
        let day =
            DateTime::from_timestamp(signed - signed % SECS_PER_DAY, 0).ok_or_else(out_of_range)?;

        Ok(UtcTimestamp {
            secs,
            at,
            hour,
            day,
        })
    }

    pub fn get_secs(&self) -> u64 {
        self.secs
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.at
    }

    /// Start of the UTC hour containing this timestamp
    pub fn hour(&self) -> DateTime<Utc> {
        self.hour
    }

    /// Midnight UTC of the day containing this timestamp
    pub fn day(&self) -> DateTime<Utc> {
        self.day
    }
}
