//! Wall-clock time utilities -- "HH:MM" text to minute-of-day and back.
//!
//! All schedule arithmetic happens on minute-of-day integers (0..=1439). Text is
//! only accepted in strict, zero-padded 24-hour form; anything else is rejected
//! rather than silently mapped to a nonsense offset. Values never wrap past
//! midnight: a computation that would land on 24:00 or later is an error.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Number of minutes in one day. Valid minute-of-day values are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A validated wall-clock time, stored as minutes since midnight.
///
/// Serializes as the "HH:MM" string used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(MINUTES_PER_DAY as u16 - 1);

    /// Build from a minute-of-day count.
    ///
    /// # Errors
    /// Returns `PlannerError::MinutesOutOfRange` for values of 1440 or more.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(PlannerError::MinutesOutOfRange(minutes));
        }
        Ok(Self(minutes as u16))
    }

    /// Build from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self::from)
            .ok_or_else(|| PlannerError::InvalidTime(format!("{}:{}", hour, minute)))
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Add `minutes`, returning `None` when the result would leave the day.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.minutes().checked_add(minutes)?).ok()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = PlannerError;

    /// Strict zero-padded "HH:MM"; "9:00" and "09:00:00" are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PlannerError::InvalidTime(s.to_string());

        // chrono alone accepts unpadded and space-padded fields
        let zero_padded = s.len() == 5
            && s.bytes()
                .enumerate()
                .all(|(i, b)| if i == 2 { b == b':' } else { b.is_ascii_digit() });
        if !zero_padded {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self::from)
            .map_err(|_| invalid())
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates seconds.
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Parse "HH:MM" into minutes since midnight: "08:30" -> 510.
pub fn to_minutes(time: &str) -> Result<u32> {
    time.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

/// Format minutes since midnight as "HH:MM": 510 -> "08:30".
///
/// # Errors
/// Returns `PlannerError::MinutesOutOfRange` for 1440 or more (no wraparound).
pub fn from_minutes(total: u32) -> Result<String> {
    TimeOfDay::from_minutes(total).map(|t| t.to_string())
}

/// Signed minutes from `start` to `end`. Negative when `end` precedes `start`.
pub fn duration(start: &str, end: &str) -> Result<i64> {
    Ok(i64::from(to_minutes(end)?) - i64::from(to_minutes(start)?))
}

/// Coarse part of the day a visit prefers to happen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBand {
    /// 06:00-12:00
    Morning,
    /// 12:00-17:00
    Afternoon,
    /// 17:00-22:00
    Evening,
}

impl TimeBand {
    /// Half-open `[start, end)` range of the band, in minutes since midnight.
    pub fn range(self) -> (u32, u32) {
        match self {
            TimeBand::Morning => (6 * 60, 12 * 60),
            TimeBand::Afternoon => (12 * 60, 17 * 60),
            TimeBand::Evening => (17 * 60, 22 * 60),
        }
    }

    pub fn contains(self, time: TimeOfDay) -> bool {
        let (start, end) = self.range();
        (start..end).contains(&time.minutes())
    }

    /// The band containing `time`, or `None` at night (22:00-06:00).
    pub fn of(time: TimeOfDay) -> Option<TimeBand> {
        [TimeBand::Morning, TimeBand::Afternoon, TimeBand::Evening]
            .into_iter()
            .find(|band| band.contains(time))
    }
}

impl fmt::Display for TimeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            TimeBand::Morning => "morning",
            TimeBand::Afternoon => "afternoon",
            TimeBand::Evening => "evening",
        })
    }
}
