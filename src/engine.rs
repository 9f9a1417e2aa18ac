// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Phase engine: current sun phase and time to the next transition.
//!
//! For every query the engine builds the day's [`Schedule`] from scratch:
//! one boundary per [`Phase`] whose threshold the sun actually crosses,
//! in morning-to-night order, with minutes stitched past UTC midnight so
//! the list never decreases. The instant is then located within it.
//!
//! Nothing is cached between calls. An engine only holds its [`Location`]
//! and can be shared freely.

use crate::almanac::{Location, UtcTimeOfDay};
use crate::calendar::{decompose, CivilTime, MINUTES_PER_DAY, SECONDS_PER_MINUTE};
use crate::error::NoCrossing;
use crate::phase::{Phase, PHASE_COUNT};
use chrono::{DateTime, Utc};
use qtty::Seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE_I32: i32 = SECONDS_PER_MINUTE as i32;

/// A phase and the minute at which it begins.
///
/// `begins` counts minutes from UTC midnight of the schedule's day and may
/// exceed 1440 for boundaries that fall after midnight.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transition {
    pub phase: Phase,
    pub begins: i32,
}

/// Phase boundaries of one UTC day.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Schedule {
    day_of_year: i32,
    transitions: [Transition; PHASE_COUNT],
    len: usize,
    crossings: [Result<UtcTimeOfDay, NoCrossing>; PHASE_COUNT],
}

impl Schedule {
    #[inline]
    pub fn day_of_year(&self) -> i32 {
        self.day_of_year
    }

    /// Boundaries that exist on this day, in phase order.
    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when the sun crosses none of the thresholds (continuous
    /// day, night or twilight).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn first(&self) -> Option<&Transition> {
        self.transitions().first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Transition> {
        self.transitions().last()
    }

    /// Stitched start minute of `phase`, if its boundary exists.
    pub fn begins(&self, phase: Phase) -> Option<i32> {
        self.transitions()
            .iter()
            .find(|t| t.phase == phase)
            .map(|t| t.begins)
    }

    /// Raw primitive output for the boundary of `phase`.
    #[inline]
    pub fn crossing(&self, phase: Phase) -> Result<UtcTimeOfDay, NoCrossing> {
        self.crossings[phase.ordinal()]
    }

    /// Phase holding all day when no boundary exists: the band just below
    /// the highest threshold the sun stays above.
    fn steady_phase(&self, morning: bool) -> Phase {
        let rising = [
            Phase::Day,
            Phase::CivilTwilightMorning,
            Phase::NauticalTwilightMorning,
            Phase::AstronomicalTwilightMorning,
        ];
        for phase in rising {
            if self.crossing(phase) == Err(NoCrossing::AlwaysAbove) {
                return Phase::band_above(phase.boundary().zenith, morning);
            }
        }
        Phase::Night
    }
}

/// Result of [`SunPhaseEngine::calculate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseReport {
    pub phase: Phase,
    /// Never negative.
    pub seconds_until_next: i32,
}

impl PhaseReport {
    /// Time until the next transition as a typed quantity.
    #[inline]
    pub fn until_next(&self) -> Seconds {
        Seconds::new(f64::from(self.seconds_until_next))
    }
}

/// Sun phase calculator for a fixed location.
///
/// ```
/// use sunphase::{Phase, SunPhaseEngine};
///
/// let engine = SunPhaseEngine::new(42.0, -83.0);
/// // 2024-06-21T17:32:00Z, local solar noon.
/// let report = engine.calculate(1_718_991_120);
/// assert_eq!(report.phase, Phase::Day);
/// assert!(report.seconds_until_next > 0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SunPhaseEngine {
    location: Location,
}

impl From<Location> for SunPhaseEngine {
    #[inline]
    fn from(location: Location) -> Self {
        Self { location }
    }
}

impl SunPhaseEngine {
    /// Latitude degrees north, longitude degrees east. Not validated.
    #[inline]
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            location: Location::new(latitude, longitude),
        }
    }

    #[inline]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// UTC time at which `phase` begins on `day_of_year`.
    pub fn phase_begins(
        &self,
        day_of_year: i32,
        phase: Phase,
    ) -> Result<UtcTimeOfDay, NoCrossing> {
        let boundary = phase.boundary();
        self.location
            .crossing_time(day_of_year, boundary.zenith.degrees(), boundary.crossing)
    }

    /// Build the stitched boundary list for `day_of_year`.
    pub fn schedule(&self, day_of_year: i32) -> Schedule {
        let mut transitions = [Transition {
            phase: Phase::Night,
            begins: 0,
        }; PHASE_COUNT];
        let mut crossings = [Err(NoCrossing::AlwaysBelow); PHASE_COUNT];
        let mut len = 0;
        let mut last = 0;
        let mut wrap_offset = 0;

        for phase in Phase::ALL {
            let crossing = self.phase_begins(day_of_year, phase);
            crossings[phase.ordinal()] = crossing;

            let time = match crossing {
                Ok(time) => time,
                Err(reason) => {
                    tracing::trace!(%phase, %reason, day_of_year, "phase boundary absent");
                    continue;
                }
            };

            // Once a boundary runs backwards the rest of the day lies past
            // UTC midnight.
            let minute = time.minute_of_day();
            if minute < last {
                wrap_offset = MINUTES_PER_DAY;
            }
            let begins = minute + wrap_offset;

            transitions[len] = Transition { phase, begins };
            len += 1;
            last = begins;
        }

        Schedule {
            day_of_year,
            transitions,
            len,
            crossings,
        }
    }

    /// Current phase at `epoch_seconds` and the seconds until it ends.
    pub fn calculate(&self, epoch_seconds: u32) -> PhaseReport {
        let civil = decompose(epoch_seconds);
        let report = self.locate(&civil);
        tracing::debug!(
            epoch_seconds,
            phase = %report.phase,
            seconds_until_next = report.seconds_until_next,
            "sun phase resolved"
        );
        report
    }

    /// [`calculate`](Self::calculate) for a chrono timestamp. Sub-second
    /// precision is dropped; `None` outside the unsigned 32-bit epoch range.
    pub fn calculate_utc(&self, at: DateTime<Utc>) -> Option<PhaseReport> {
        u32::try_from(at.timestamp())
            .ok()
            .map(|epoch_seconds| self.calculate(epoch_seconds))
    }

    fn locate(&self, civil: &CivilTime) -> PhaseReport {
        let input = civil.minute_of_day();
        let second = i32::from(civil.second);
        let day_of_year = i32::from(civil.day_of_year);
        let today = self.schedule(day_of_year);

        let Some(last) = today.last() else {
            return self.steady(&today, input, second);
        };

        // Yesterday's evening boundaries spill into the start of this UTC
        // day; today's stitched tail stands in for them.
        let minute = if input + MINUTES_PER_DAY < last.begins {
            input + MINUTES_PER_DAY
        } else {
            input
        };

        // Before the first boundary the last phase of the cycle holds.
        let mut current = last.phase;
        for transition in today.transitions() {
            if transition.begins > minute {
                return PhaseReport {
                    phase: current,
                    seconds_until_next: (transition.begins - minute) * SECONDS_PER_MINUTE_I32
                        - second,
                };
            }
            current = transition.phase;
        }

        PhaseReport {
            phase: current,
            seconds_until_next: self.seconds_until_tomorrow(day_of_year, input, second),
        }
    }

    /// Seconds until the first boundary of the next day, or until UTC
    /// midnight if that day has none.
    fn seconds_until_tomorrow(&self, day_of_year: i32, input: i32, second: i32) -> i32 {
        let tomorrow = self.schedule(day_of_year + 1);
        let first = tomorrow.first().map_or(0, |t| t.begins);
        (MINUTES_PER_DAY + first - input) * SECONDS_PER_MINUTE_I32 - second
    }

    /// Report for a day without boundaries. Twilight bands switch between
    /// morning and evening at local mean noon and midnight; any other phase
    /// holds until UTC midnight, where the next day takes over.
    fn steady(&self, today: &Schedule, input: i32, second: i32) -> PhaseReport {
        let local = self.local_mean_minute(input);
        let morning = local < MINUTES_PER_DAY / 2;
        let phase = today.steady_phase(morning);

        let mut minutes = MINUTES_PER_DAY - input;
        if phase.is_twilight() {
            let flip = if morning {
                MINUTES_PER_DAY / 2 - local
            } else {
                MINUTES_PER_DAY - local
            };
            minutes = minutes.min(flip);
        }

        PhaseReport {
            phase,
            seconds_until_next: minutes * SECONDS_PER_MINUTE_I32 - second,
        }
    }

    /// Local mean solar time as minutes since local midnight.
    fn local_mean_minute(&self, input: i32) -> i32 {
        let offset = (self.location.longitude_hours() * 60.0) as i32;
        (input + offset).rem_euclid(MINUTES_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DETROIT: SunPhaseEngine = SunPhaseEngine::new(42.0, -83.0);

    fn epoch(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> u32 {
        Utc.with_ymd_and_hms(y, m, d, hh, mm, ss)
            .unwrap()
            .timestamp() as u32
    }

    #[test]
    fn summer_schedule_is_complete_and_ordered() {
        let schedule = DETROIT.schedule(172);
        assert_eq!(schedule.len(), PHASE_COUNT);
        let phases: Vec<Phase> = schedule.transitions().iter().map(|t| t.phase).collect();
        assert_eq!(phases, Phase::ALL.to_vec());
        assert!(schedule
            .transitions()
            .windows(2)
            .all(|w| w[0].begins <= w[1].begins));
        // Sunset falls after UTC midnight and is stitched onto the day.
        let sunset = schedule.begins(Phase::CivilTwilightEvening).unwrap();
        assert!(sunset > MINUTES_PER_DAY, "{sunset}");
    }

    #[test]
    fn winter_schedule_stitches_negative_hours() {
        let schedule = DETROIT.schedule(355);
        assert_eq!(schedule.len(), PHASE_COUNT);
        assert!(schedule.crossing(Phase::CivilTwilightEvening).unwrap().hour < 0);
        // 22:03 UTC stays on the same day.
        let sunset = schedule.begins(Phase::CivilTwilightEvening).unwrap();
        assert!((1300..1350).contains(&sunset), "{sunset}");
        assert!(schedule
            .transitions()
            .windows(2)
            .all(|w| w[0].begins <= w[1].begins));
    }

    #[test]
    fn noon_is_day_and_midnight_is_night() {
        let noon = DETROIT.calculate(epoch(2024, 6, 21, 17, 32, 0));
        assert_eq!(noon.phase, Phase::Day);
        let midnight = DETROIT.calculate(epoch(2024, 6, 21, 5, 32, 0));
        assert_eq!(midnight.phase, Phase::Night);
    }

    #[test]
    fn next_boundary_is_reported_in_whole_seconds() {
        let at = epoch(2024, 6, 21, 9, 0, 0);
        let report = DETROIT.calculate(at);
        let begins = DETROIT
            .schedule(172)
            .begins(report.phase.next())
            .unwrap();
        assert_eq!(report.seconds_until_next, (begins - 9 * 60) * 60);

        let later = DETROIT.calculate(at + 25);
        assert_eq!(later.phase, report.phase);
        assert_eq!(later.seconds_until_next, report.seconds_until_next - 25);
    }

    #[test]
    fn evening_twilight_after_utc_midnight() {
        // 02:00 UTC is 22:00 EDT: the sun set about an hour ago.
        let report = DETROIT.calculate(epoch(2024, 6, 21, 2, 0, 0));
        assert!(
            matches!(
                report.phase,
                Phase::NauticalTwilightEvening | Phase::AstronomicalTwilightEvening
            ),
            "{report:?}"
        );
        assert!(report.seconds_until_next < 3_600);
    }

    #[test]
    fn east_longitude_daytime() {
        let tokyo = SunPhaseEngine::new(35.7, 139.7);
        // 03:00 UTC is noon in Tokyo.
        let report = tokyo.calculate(epoch(2024, 6, 21, 3, 0, 0));
        assert_eq!(report.phase, Phase::Day);
        // 13:00 UTC is 22:00 local.
        let report = tokyo.calculate(epoch(2024, 6, 21, 13, 0, 0));
        assert_eq!(report.phase, Phase::Night);
    }

    #[test]
    fn late_night_waits_for_tomorrows_dawn() {
        let at = epoch(2024, 12, 21, 23, 50, 0);
        let report = DETROIT.calculate(at);
        assert_eq!(report.phase, Phase::Night);
        let dawn = DETROIT
            .phase_begins(356, Phase::AstronomicalTwilightMorning)
            .unwrap()
            .minute_of_day();
        assert_eq!(
            report.seconds_until_next,
            (MINUTES_PER_DAY + dawn - (23 * 60 + 50)) * 60
        );
    }

    #[test]
    fn continuous_day_and_night() {
        let north = SunPhaseEngine::new(80.0, 0.0);
        assert!(north.schedule(172).is_empty());
        let report = north.calculate(epoch(2024, 6, 21, 12, 0, 0));
        assert_eq!(report.phase, Phase::Day);
        assert_eq!(report.seconds_until_next, 12 * 3_600);

        // Tomorrow's boundaries are never counted from an empty day.
        let just_after_midnight = north.calculate(epoch(2024, 6, 21, 0, 5, 30));
        assert_eq!(just_after_midnight.phase, Phase::Day);
        assert_eq!(just_after_midnight.seconds_until_next, (1_440 - 5) * 60 - 30);

        let deep = SunPhaseEngine::new(85.0, 0.0);
        assert!(deep.schedule(355).is_empty());
        let report = deep.calculate(epoch(2024, 12, 21, 6, 0, 0));
        assert_eq!(report.phase, Phase::Night);
    }

    #[test]
    fn continuous_civil_twilight_near_the_pole() {
        let pole = SunPhaseEngine::new(89.0, 0.0);
        // 2023-10-02 is day 274: sun circles between -6° and -0.83°.
        let schedule = pole.schedule(274);
        assert!(schedule.is_empty());
        assert_eq!(schedule.crossing(Phase::Day), Err(NoCrossing::AlwaysBelow));
        assert_eq!(
            schedule.crossing(Phase::CivilTwilightMorning),
            Err(NoCrossing::AlwaysAbove)
        );

        let at = epoch(2023, 10, 2, 6, 0, 0);
        let morning = pole.calculate(at);
        assert_eq!(morning.phase, Phase::CivilTwilightMorning);
        // Counts down to local mean noon, where the band turns to evening.
        assert_eq!(morning.seconds_until_next, 6 * 3_600);
        let before_noon = pole.calculate(at + 6 * 3_600 - 60);
        assert_eq!(before_noon.phase, Phase::CivilTwilightMorning);
        assert_eq!(before_noon.seconds_until_next, 60);
        let noon = pole.calculate(at + 6 * 3_600);
        assert_eq!(noon.phase, Phase::CivilTwilightEvening);
        assert_eq!(noon.seconds_until_next, 12 * 3_600);

        let evening = pole.calculate(epoch(2023, 10, 2, 18, 0, 0));
        assert_eq!(evening.phase, Phase::CivilTwilightEvening);
        assert_eq!(evening.seconds_until_next, 6 * 3_600);
    }

    #[test]
    fn report_quantity() {
        let report = PhaseReport {
            phase: Phase::Day,
            seconds_until_next: 5_400,
        };
        assert_eq!(report.until_next(), Seconds::new(5_400.0));
    }

    #[test]
    fn calculate_utc_range() {
        let at = Utc.with_ymd_and_hms(2024, 6, 21, 17, 32, 0).unwrap();
        assert_eq!(
            DETROIT.calculate_utc(at),
            Some(DETROIT.calculate(at.timestamp() as u32))
        );
        let before_epoch = Utc.with_ymd_and_hms(1969, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(DETROIT.calculate_utc(before_epoch), None);
    }
}
