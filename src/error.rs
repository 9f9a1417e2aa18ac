// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.

use thiserror::Error;

/// The sun does not cross a zenith threshold on the requested day.
///
/// This is an expected outcome at high latitudes (polar day or night
/// relative to the threshold), not a fault. The engine drops the
/// corresponding boundary from the day's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoCrossing {
    /// `cos H > 1`: the sun stays below the threshold all day.
    #[error("the sun never rises above the threshold on this day")]
    AlwaysBelow,
    /// `cos H < -1`: the sun stays above the threshold all day.
    #[error("the sun never sinks below the threshold on this day")]
    AlwaysAbove,
}

/// Returned when parsing a [`Phase`](crate::Phase) from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sun phase name: {0:?}")]
pub struct ParsePhaseError(pub String);
