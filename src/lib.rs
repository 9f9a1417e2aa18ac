// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sun Phase Engine
//!
//! Which of eight solar-illumination phases holds at a location and UTC
//! instant, and how many seconds remain until the next one. Built for
//! clock-keeping devices that only have a raw epoch-seconds counter.
//!
//! # Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`calendar`] | epoch seconds ↔ [`CivilTime`] without a calendar library |
//! | [`almanac`] | Nautical Almanac rise/set time for any zenith threshold |
//! | [`engine`] | day schedule, current [`Phase`], time to next transition |
//!
//! # Phases
//!
//! | Phase | Sun zenith |
//! |-------|------------|
//! | [`Phase::AstronomicalTwilightMorning`] | rising past 108° |
//! | [`Phase::NauticalTwilightMorning`] | rising past 102° |
//! | [`Phase::CivilTwilightMorning`] | rising past 96° |
//! | [`Phase::Day`] | rising past 90°50′ |
//! | [`Phase::CivilTwilightEvening`] | setting past 90°50′ |
//! | [`Phase::NauticalTwilightEvening`] | setting past 96° |
//! | [`Phase::AstronomicalTwilightEvening`] | setting past 102° |
//! | [`Phase::Night`] | setting past 108° |
//!
//! At high latitudes some thresholds are never crossed; those phases are
//! simply missing from the day and the rest still resolve.
//!
//! # Example
//!
//! ```
//! use sunphase::{Phase, SunPhaseEngine};
//!
//! let engine = SunPhaseEngine::new(42.0, -83.0);
//! let report = engine.calculate(1_718_928_000); // 2024-06-21T00:00:00Z
//! assert_eq!(report.phase, Phase::Day);
//! println!("{} for another {} s", report.phase, report.seconds_until_next);
//! ```

pub mod almanac;
pub mod calendar;
pub mod engine;
mod error;
mod phase;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use almanac::{crossing_time, Location, UtcTimeOfDay};
pub use calendar::{decompose, recompose, CivilTime};
pub use engine::{PhaseReport, Schedule, SunPhaseEngine, Transition};
pub use error::{NoCrossing, ParsePhaseError};
pub use phase::{Boundary, Crossing, Phase, Zenith, PHASE_COUNT};
