// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar-illumination phases and the zenith thresholds that bound them.
//!
//! Each [`Phase`] begins when the sun crosses one [`Zenith`] threshold in
//! one [`Crossing`] direction:
//!
//! | Phase | Begins at |
//! |-------|-----------|
//! | [`Phase::AstronomicalTwilightMorning`] | 108° rising |
//! | [`Phase::NauticalTwilightMorning`] | 102° rising |
//! | [`Phase::CivilTwilightMorning`] | 96° rising |
//! | [`Phase::Day`] | 90.83333° rising (sunrise) |
//! | [`Phase::CivilTwilightEvening`] | 90.83333° setting (sunset) |
//! | [`Phase::NauticalTwilightEvening`] | 96° setting |
//! | [`Phase::AstronomicalTwilightEvening`] | 102° setting |
//! | [`Phase::Night`] | 108° setting |

use crate::error::ParsePhaseError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of phases in one day cycle.
pub const PHASE_COUNT: usize = 8;

/// Sun zenith angle defining a phase boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Zenith {
    /// 90°50′: upper limb on the horizon, refraction included.
    Official,
    Civil,
    Nautical,
    Astronomical,
}

impl Zenith {
    /// All thresholds, nearest the horizon first.
    pub const ALL: [Zenith; 4] = [
        Zenith::Official,
        Zenith::Civil,
        Zenith::Nautical,
        Zenith::Astronomical,
    ];

    /// Angle from the vertical, in degrees.
    #[inline]
    pub const fn degrees(self) -> f32 {
        match self {
            Zenith::Official => 90.833_33,
            Zenith::Civil => 96.0,
            Zenith::Nautical => 102.0,
            Zenith::Astronomical => 108.0,
        }
    }
}

/// Direction in which the sun passes a threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossing {
    Rising,
    Setting,
}

impl Crossing {
    #[inline]
    pub const fn is_setting(self) -> bool {
        matches!(self, Crossing::Setting)
    }
}

/// The threshold crossing at which a phase begins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boundary {
    pub zenith: Zenith,
    pub crossing: Crossing,
}

/// Phase boundaries indexed by [`Phase::ordinal`].
const BOUNDARIES: [Boundary; PHASE_COUNT] = [
    Boundary {
        zenith: Zenith::Astronomical,
        crossing: Crossing::Rising,
    },
    Boundary {
        zenith: Zenith::Nautical,
        crossing: Crossing::Rising,
    },
    Boundary {
        zenith: Zenith::Civil,
        crossing: Crossing::Rising,
    },
    Boundary {
        zenith: Zenith::Official,
        crossing: Crossing::Rising,
    },
    Boundary {
        zenith: Zenith::Official,
        crossing: Crossing::Setting,
    },
    Boundary {
        zenith: Zenith::Civil,
        crossing: Crossing::Setting,
    },
    Boundary {
        zenith: Zenith::Nautical,
        crossing: Crossing::Setting,
    },
    Boundary {
        zenith: Zenith::Astronomical,
        crossing: Crossing::Setting,
    },
];

const NAMES: [&str; PHASE_COUNT] = [
    "ASTRONOMICAL_TWILIGHT_MORNING",
    "NAUTICAL_TWILIGHT_MORNING",
    "CIVIL_TWILIGHT_MORNING",
    "DAY",
    "CIVIL_TWILIGHT_EVENING",
    "NAUTICAL_TWILIGHT_EVENING",
    "ASTRONOMICAL_TWILIGHT_EVENING",
    "NIGHT",
];

/// One of the eight illumination states of a day, in circadian order.
///
/// The order is cyclic: [`Phase::Night`] is followed by
/// [`Phase::AstronomicalTwilightMorning`] of the next day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    AstronomicalTwilightMorning,
    NauticalTwilightMorning,
    CivilTwilightMorning,
    Day,
    CivilTwilightEvening,
    NauticalTwilightEvening,
    AstronomicalTwilightEvening,
    Night,
}

impl Phase {
    /// All phases, morning to night.
    pub const ALL: [Phase; PHASE_COUNT] = [
        Phase::AstronomicalTwilightMorning,
        Phase::NauticalTwilightMorning,
        Phase::CivilTwilightMorning,
        Phase::Day,
        Phase::CivilTwilightEvening,
        Phase::NauticalTwilightEvening,
        Phase::AstronomicalTwilightEvening,
        Phase::Night,
    ];

    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_ordinal(ordinal: usize) -> Option<Phase> {
        if ordinal < PHASE_COUNT {
            Some(Self::ALL[ordinal])
        } else {
            None
        }
    }

    /// The phase that follows this one, wrapping from night to morning.
    #[inline]
    pub const fn next(self) -> Phase {
        Self::ALL[(self.ordinal() + 1) % PHASE_COUNT]
    }

    /// The phase that precedes this one, wrapping from morning to night.
    #[inline]
    pub const fn previous(self) -> Phase {
        Self::ALL[(self.ordinal() + PHASE_COUNT - 1) % PHASE_COUNT]
    }

    /// Threshold crossing at which this phase begins.
    #[inline]
    pub const fn boundary(self) -> Boundary {
        BOUNDARIES[self.ordinal()]
    }

    /// Fixed display name, e.g. `"CIVIL_TWILIGHT_EVENING"`.
    #[inline]
    pub const fn name(self) -> &'static str {
        NAMES[self.ordinal()]
    }

    #[inline]
    pub const fn is_twilight(self) -> bool {
        !matches!(self, Phase::Day | Phase::Night)
    }

    /// Morning twilight phases. `Day` and `Night` are neither.
    #[inline]
    pub const fn is_morning(self) -> bool {
        matches!(
            self,
            Phase::AstronomicalTwilightMorning
                | Phase::NauticalTwilightMorning
                | Phase::CivilTwilightMorning
        )
    }

    /// The phase in which the sun sits between `zenith` and the next
    /// threshold below it. `Official` maps to `Day`.
    pub(crate) const fn band_above(zenith: Zenith, morning: bool) -> Phase {
        match (zenith, morning) {
            (Zenith::Official, _) => Phase::Day,
            (Zenith::Civil, true) => Phase::CivilTwilightMorning,
            (Zenith::Civil, false) => Phase::CivilTwilightEvening,
            (Zenith::Nautical, true) => Phase::NauticalTwilightMorning,
            (Zenith::Nautical, false) => Phase::NauticalTwilightEvening,
            (Zenith::Astronomical, true) => Phase::AstronomicalTwilightMorning,
            (Zenith::Astronomical, false) => Phase::AstronomicalTwilightEvening,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Phase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePhaseError(s.to_owned()))
    }
}
