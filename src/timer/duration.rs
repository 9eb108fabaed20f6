//! Conversion between (days, hours, minutes) and millisecond durations.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MS_PER_MINUTE: u64 = 60_000;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// A duration as the user enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationParts {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl DurationParts {
    pub fn new(days: u32, hours: u32, minutes: u32) -> Self {
        Self {
            days,
            hours,
            minutes,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }

    pub fn to_millis(self) -> u64 {
        encode(self.days, self.hours, self.minutes)
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

pub fn encode(days: u32, hours: u32, minutes: u32) -> u64 {
    u64::from(days) * MS_PER_DAY + u64::from(hours) * MS_PER_HOUR + u64::from(minutes) * MS_PER_MINUTE
}

/// Split a duration into days, hours and minutes.
///
/// Sub-minute remainders round up: the total is converted to whole minutes
/// with a ceiling first and then split, so `minutes` stays below 60 and a
/// countdown with 30 seconds left still reads as one minute.
pub fn decode(duration_ms: u64) -> DurationParts {
    let total_minutes = duration_ms.div_ceil(MS_PER_MINUTE);
    let days = total_minutes / MINUTES_PER_DAY;
    let rem = total_minutes % MINUTES_PER_DAY;

    DurationParts {
        days: u32::try_from(days).unwrap_or(u32::MAX),
        hours: (rem / MINUTES_PER_HOUR) as u32,
        minutes: (rem % MINUTES_PER_HOUR) as u32,
    }
}

pub fn format_duration(duration_ms: u64) -> String {
    decode(duration_ms).to_string()
}
