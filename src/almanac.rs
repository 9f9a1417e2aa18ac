// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Sunrise/sunset primitive
//!
//! The approximate solar rise/set algorithm published in the *Almanac for
//! Computers* (Nautical Almanac Office, U.S. Naval Observatory, 1990),
//! generalised to an arbitrary zenith threshold so the same routine yields
//! sunrise, sunset and the three twilight pairs.
//!
//! All arithmetic is `f32`. At mid latitudes the results agree with USNO
//! tables within about one minute.
//!
//! ## Conventions
//! * Latitude positive north, longitude positive east, both in degrees.
//! * `day_of_year` is zero-based; negative values wrap once by 365 so a
//!   "yesterday" query on January 1st still lands in December.
//! * The returned [`UtcTimeOfDay`] is **not** wrapped into a single day:
//!   the hour may be negative or reach 24 and beyond for locations far
//!   from Greenwich. Callers reduce it (see [`UtcTimeOfDay::minute_of_day`]).

use crate::calendar::MINUTES_PER_DAY;
use crate::error::NoCrossing;
use crate::phase::Crossing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Observer position in degrees. Not validated; callers keep latitude in
/// `[-90, 90]` and longitude in `[-180, 180]`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Degrees north.
    pub latitude: f32,
    /// Degrees east.
    pub longitude: f32,
}

impl Location {
    #[inline]
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Offset of local mean solar time from UTC, in hours.
    #[inline]
    pub fn longitude_hours(&self) -> f32 {
        self.longitude / 15.0
    }

    /// UTC time at which the sun crosses `zenith_deg` on `day_of_year`.
    ///
    /// See [`crossing_time`].
    #[inline]
    pub fn crossing_time(
        &self,
        day_of_year: i32,
        zenith_deg: f32,
        crossing: Crossing,
    ) -> Result<UtcTimeOfDay, NoCrossing> {
        crossing_time(self, day_of_year, zenith_deg, crossing)
    }
}

/// Hour and minute of a threshold crossing, in UTC.
///
/// `minute` is always in `0..60`; `hour` is unbounded (see the module
/// conventions).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UtcTimeOfDay {
    pub hour: i32,
    pub minute: i32,
}

impl UtcTimeOfDay {
    /// Minutes relative to UTC midnight of the queried day, unwrapped.
    #[inline]
    pub const fn total_minutes(&self) -> i32 {
        self.hour * 60 + self.minute
    }

    /// Minutes since UTC midnight, reduced into `0..1440`.
    #[inline]
    pub const fn minute_of_day(&self) -> i32 {
        self.total_minutes().rem_euclid(MINUTES_PER_DAY)
    }
}

/// Add or remove one turn. Inputs are never more than one turn out of range.
#[inline]
fn adjust_to_360(degrees: f32) -> f32 {
    if degrees > 360.0 {
        degrees - 360.0
    } else if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Local hour angle, in hours, for a given `cos H`.
///
/// `|cos H| > 1` means the threshold is never reached (`> 1`) or never
/// left (`< -1`). Exactly `±1` is a tangent crossing and succeeds.
pub fn hour_angle_hours(cos_h: f32, crossing: Crossing) -> Result<f32, NoCrossing> {
    if cos_h > 1.0 {
        return Err(NoCrossing::AlwaysBelow);
    }
    if cos_h < -1.0 {
        return Err(NoCrossing::AlwaysAbove);
    }

    let h = cos_h.acos().to_degrees();
    let h = match crossing {
        Crossing::Setting => h,
        Crossing::Rising => 360.0 - h,
    };
    Ok(h / 15.0)
}

/// UTC time at which the sun's centre passes `zenith_deg` at `location` on
/// the zero-based `day_of_year`.
///
/// Returns [`NoCrossing`] when the sun stays entirely above or below the
/// threshold for the whole day.
pub fn crossing_time(
    location: &Location,
    day_of_year: i32,
    zenith_deg: f32,
    crossing: Crossing,
) -> Result<UtcTimeOfDay, NoCrossing> {
    let day = if day_of_year < 0 {
        day_of_year + 365
    } else {
        day_of_year
    };

    // Approximate time of the event, in days.
    let lon_hour = location.longitude_hours();
    let h0 = if crossing.is_setting() { 18.0 } else { 6.0 };
    let t = day as f32 + (h0 - lon_hour) / 24.0;

    // Mean anomaly and true longitude of the sun.
    let m = 0.9856 * t - 3.289;
    let m_rad = m.to_radians();
    let l = adjust_to_360(m + 1.916 * m_rad.sin() + 0.020 * (2.0 * m_rad).sin() + 282.634);
    let l_rad = l.to_radians();

    // Right ascension, moved into the same quadrant as L, in hours.
    let mut ra = adjust_to_360((0.91764 * l_rad.tan()).atan().to_degrees());
    ra += (l / 90.0).floor() * 90.0 - (ra / 90.0).floor() * 90.0;
    ra /= 15.0;

    let sin_dec = 0.39782 * l_rad.sin();
    let cos_dec = sin_dec.asin().cos();

    let lat_rad = location.latitude.to_radians();
    let cos_h =
        (zenith_deg.to_radians().cos() - sin_dec * lat_rad.sin()) / (cos_dec * lat_rad.cos());
    let h = hour_angle_hours(cos_h, crossing)?;

    // Local mean time of the event, then back to UTC.
    let local_mean = h + ra - 0.06571 * t - 6.622;
    let ut = local_mean - lon_hour;

    // Minutes come from the floored hour, so 16h60m cannot happen.
    let hour = ut.floor();
    let minute = (60.0 * (ut - hour)) as i32;
    Ok(UtcTimeOfDay {
        hour: hour as i32,
        minute: minute.min(59),
    })
}
