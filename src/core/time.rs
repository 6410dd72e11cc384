// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tick-exact time arithmetic.
//!
//! All timestamps and sample periods in sweepcat are integer ticks at 10 ns
//! resolution. Decoder interfaces hand out floating-point seconds; those are
//! converted to ticks exactly once, at the boundary, by rounding to the
//! nearest tick. From then on every offset, intersection, and buffer position
//! is computed with integer division, so long windows never accumulate
//! floating-point drift.
//!
//! The rounded tick value is also the identity for sample periods: two
//! segments have "the same period" iff their rounded tick values are equal.
//! This absorbs representation noise such as `1.9999999999999998e-05`, which
//! normalizes to the same 2000 ticks as `2.0e-05`.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, NaiveDate, Utc};

/// Ticks per second. One tick is 10 ns (8 decimal digits of seconds).
pub const TICKS_PER_SECOND: i64 = 100_000_000;

/// A span or instant measured in 10 ns ticks.
///
/// Instants are ticks since the Unix epoch (UTC); spans and sample periods
/// are plain tick counts. Both use the same representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(i64);

impl Ticks {
    /// The zero span.
    pub const ZERO: Ticks = Ticks(0);

    /// Create from a raw tick count.
    pub const fn new(raw: i64) -> Self {
        Ticks(raw)
    }

    /// Convert floating-point seconds to ticks, rounding to the nearest tick.
    ///
    /// This is the single normalization point for decoder-provided seconds
    /// (segment offsets, sample intervals, seconds-of-day).
    pub fn from_secs_f64(secs: f64) -> Self {
        Ticks((secs * TICKS_PER_SECOND as f64).round() as i64)
    }

    /// Raw tick count.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Approximate value in seconds. For display only, never for arithmetic.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND as f64
    }

    /// Number of whole `period` spans contained in this span.
    ///
    /// Integer division; callers pass spans that are whole multiples of the
    /// period when exactness matters.
    pub fn periods(self, period: Ticks) -> i64 {
        self.0 / period.0
    }

    /// Convert an epoch instant to a UTC datetime, if representable.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let secs = self.0.div_euclid(TICKS_PER_SECOND);
        let nanos = (self.0.rem_euclid(TICKS_PER_SECOND) * 10) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }
}

impl Add for Ticks {
    type Output = Ticks;

    fn add(self, rhs: Ticks) -> Ticks {
        Ticks(self.0 + rhs.0)
    }
}

impl Sub for Ticks {
    type Output = Ticks;

    fn sub(self, rhs: Ticks) -> Ticks {
        Ticks(self.0 - rhs.0)
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}t", self.0)
    }
}

/// Resolve a recording's embedded UTC header to an absolute epoch instant.
///
/// The header carries a year, a 1-based day-of-year, and seconds within that
/// day. The absolute timestamp is `UTC(year, Jan 1) + (day_of_year - 1) days
/// + seconds_of_day`. Returns `None` when year/day-of-year do not form a
/// valid date.
pub fn timestamp_from_utc_header(year: i32, day_of_year: u32, seconds_of_day: f64) -> Option<Ticks> {
    let date = NaiveDate::from_yo_opt(year, day_of_year)?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
    Some(Ticks(midnight * TICKS_PER_SECOND) + Ticks::from_secs_f64(seconds_of_day))
}
