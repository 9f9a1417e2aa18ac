// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar conversion for raw epoch counters.
//!
//! Maps an unsigned 32-bit count of seconds since `1970-01-01T00:00:00Z`
//! (POSIX time, no leap seconds) to calendar fields and back, without any
//! time-zone database. Everything is UTC.
//!
//! | Field | Range | Base |
//! |-------|-------|------|
//! | `second`, `minute` | 0–59 | 0 |
//! | `hour` | 0–23 | 0 |
//! | `day_of_month` | 1–31 | 1 |
//! | `month` | 0–11 | 0 |
//! | `year` | offset from 1970 | 0 |
//! | `day_of_year` | 0–365 | 0 |
//!
//! [`decompose`] and [`recompose`] are exact inverses over the whole `u32`
//! range (1970 through early 2106).

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: u32 = 60;
pub const SECONDS_PER_HOUR: u32 = 3_600;
pub const SECONDS_PER_DAY: u32 = 86_400;
pub const MINUTES_PER_DAY: i32 = 1_440;

/// The first year of the epoch counter.
pub const EPOCH_YEAR: i32 = 1970;

/// Month lengths for a common year, January first.
const MONTH_DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Proleptic Gregorian leap rule for a year given as an offset from 1970.
#[inline]
pub const fn is_leap_year(year_offset: u16) -> bool {
    let year = EPOCH_YEAR + year_offset as i32;
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// 365 or 366.
#[inline]
pub const fn days_in_year(year_offset: u16) -> u32 {
    if is_leap_year(year_offset) {
        366
    } else {
        365
    }
}

/// Length of a zero-based `month` in the given year. February follows the
/// leap rule.
#[inline]
pub const fn days_in_month(year_offset: u16, month: u8) -> u8 {
    if month == 1 && is_leap_year(year_offset) {
        29
    } else {
        MONTH_DAYS[month as usize]
    }
}

/// Calendar fields of a UTC instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CivilTime {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    /// 1-based.
    pub day_of_month: u8,
    /// 0-based.
    pub month: u8,
    /// Years since 1970.
    pub year: u16,
    /// 0-based. The authoritative day field for the almanac.
    pub day_of_year: u16,
}

impl CivilTime {
    /// Calendar fields for `epoch_seconds`. Same as [`decompose`].
    #[inline]
    pub fn from_epoch(epoch_seconds: u32) -> Self {
        decompose(epoch_seconds)
    }

    /// Seconds since the epoch. Same as [`recompose`].
    #[inline]
    pub fn to_epoch(&self) -> u32 {
        recompose(self)
    }

    /// Gregorian year number (e.g. `2024`).
    #[inline]
    pub const fn full_year(&self) -> i32 {
        EPOCH_YEAR + self.year as i32
    }

    /// Whole minutes elapsed since UTC midnight.
    #[inline]
    pub const fn minute_of_day(&self) -> i32 {
        self.hour as i32 * 60 + self.minute as i32
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` only if chrono rejects the timestamp, which cannot
    /// happen for values produced by [`decompose`].
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(i64::from(recompose(self)), 0)
    }
}

/// Split an epoch counter into calendar fields.
pub fn decompose(epoch_seconds: u32) -> CivilTime {
    let mut time = epoch_seconds;
    let second = (time % 60) as u8;
    time /= 60;
    let minute = (time % 60) as u8;
    time /= 60;
    let hour = (time % 24) as u8;
    time /= 24;

    // `time` now counts days since the epoch.
    let mut year: u16 = 0;
    let mut elapsed: u32 = 0;
    while elapsed + days_in_year(year) <= time {
        elapsed += days_in_year(year);
        year += 1;
    }

    let day_of_year = time - elapsed;
    let mut remaining = day_of_year;
    let mut month: u8 = 0;
    while month < 11 {
        let length = u32::from(days_in_month(year, month));
        if remaining < length {
            break;
        }
        remaining -= length;
        month += 1;
    }

    CivilTime {
        second,
        minute,
        hour,
        day_of_month: remaining as u8 + 1,
        month,
        year,
        day_of_year: day_of_year as u16,
    }
}

/// Reassemble calendar fields into an epoch counter.
///
/// `month` and `day_of_month` are used when both are in range (0–11 and
/// 1–31); otherwise `day_of_year` is used instead. Callers that step
/// `day_of_year` on its own can invalidate `month` to select it.
pub fn recompose(civil: &CivilTime) -> u32 {
    let mut days: u32 = (0..civil.year).map(days_in_year).sum();

    if civil.month <= 11 && (1..=31).contains(&civil.day_of_month) {
        days += (0..civil.month)
            .map(|month| u32::from(days_in_month(civil.year, month)))
            .sum::<u32>();
        days += u32::from(civil.day_of_month) - 1;
    } else {
        days += u32::from(civil.day_of_year);
    }

    days * SECONDS_PER_DAY
        + u32::from(civil.hour) * SECONDS_PER_HOUR
        + u32::from(civil.minute) * SECONDS_PER_MINUTE
        + u32::from(civil.second)
}
