//! Time windows, remote partition keys and GOES scan timestamps.
//!
//! The NOAA GOES buckets partition objects as `{product}/{year}/{day_of_year}/{hour}/`.
//! Object names embed the scan start as `_sYYYYJJJHHMMSSt` where `t` is tenths
//! of a second.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GoesError, GoesResult};

/// Command-line time format, e.g. `2020-05-23/1200`.
pub const CLI_TIME_FORMAT: &str = "%Y-%m-%d/%H%M";

/// First month served by the GOES-R archive (2017-03-01 00:00 UTC).
const GOES_R_FIRST_MONTH: (i32, u32) = (2017, 3);

/// Parse a command-line time (`YYYY-mm-dd/HHMM`) as UTC.
pub fn parse_cli_time(s: &str) -> GoesResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), CLI_TIME_FORMAT)
        .map(|ndt| Utc.from_utc_datetime(&ndt))
        .map_err(|e| GoesError::InvalidTime(format!("'{}' ({}), expected YYYY-mm-dd/HHMM", s, e)))
}

/// Which generation of archive a window falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    /// Entirely before 2017-03-01: GOES-N GridSat archive.
    Legacy,
    /// Entirely on/after 2017-03-01: GOES-R S3 buckets.
    GoesR,
    /// Crosses the boundary between the two.
    Straddling,
}

/// An inclusive `[start, end]` UTC interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> GoesResult<Self> {
        if start > end {
            return Err(GoesError::InvalidWindow {
                start: start.format(CLI_TIME_FORMAT).to_string(),
                end: end.format(CLI_TIME_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse both ends from command-line strings.
    pub fn parse(start: &str, end: &str) -> GoesResult<Self> {
        Self::new(parse_cli_time(start)?, parse_cli_time(end)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        dt >= &self.start && dt <= &self.end
    }

    /// One key per calendar hour touched by the window, in chronological order.
    pub fn partition_keys(&self) -> Vec<PartitionKey> {
        let mut cursor = self.start
            - Duration::minutes(self.start.minute() as i64)
            - Duration::seconds(self.start.second() as i64)
            - Duration::nanoseconds(self.start.nanosecond() as i64);

        let mut keys = Vec::new();
        while cursor <= self.end {
            keys.push(PartitionKey::from_datetime(&cursor));
            cursor += Duration::hours(1);
        }
        keys
    }

    pub fn era(&self) -> Era {
        let before = |dt: &DateTime<Utc>| (dt.year(), dt.month()) < GOES_R_FIRST_MONTH;
        match (before(&self.start), before(&self.end)) {
            (true, true) => Era::Legacy,
            (false, false) => Era::GoesR,
            _ => Era::Straddling,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(CLI_TIME_FORMAT),
            self.end.format(CLI_TIME_FORMAT)
        )
    }
}

/// Address of one hourly listing directory in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartitionKey {
    pub year: i32,
    pub day_of_year: u32,
    pub hour: u32,
}

impl PartitionKey {
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            day_of_year: dt.ordinal(),
            hour: dt.hour(),
        }
    }

    /// Listing prefix under a product root, e.g. `ABI-L2-CMIPC/2020/144/12`.
    pub fn prefix(&self, product_root: &str) -> String {
        format!("{}/{}", product_root.trim_end_matches('/'), self)
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:03}/{:02}", self.year, self.day_of_year, self.hour)
    }
}

/// Extract the scan start time from a GOES object path.
///
/// Looks for `_s` followed by 14 digits (`YYYYJJJHHMMSSt`); the tenth-second
/// digit is dropped.
pub fn parse_scan_time(path: &str) -> Option<DateTime<Utc>> {
    path.match_indices("_s").find_map(|(pos, _)| {
        let digits = path.get(pos + 2..pos + 16)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        parse_goes_timestamp(&digits[..13])
    })
}

/// Parse `YYYYJJJHHMMSS` (day-of-year form).
fn parse_goes_timestamp(time_str: &str) -> Option<DateTime<Utc>> {
    let year: i32 = time_str.get(0..4)?.parse().ok()?;
    let day_of_year: u32 = time_str.get(4..7)?.parse().ok()?;
    let hour: u32 = time_str.get(7..9)?.parse().ok()?;
    let minute: u32 = time_str.get(9..11)?.parse().ok()?;
    let second: u32 = time_str.get(11..13)?.parse().ok()?;

    let date = NaiveDate::from_yo_opt(year, day_of_year)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
}
