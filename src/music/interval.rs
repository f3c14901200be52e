// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Signed semitone intervals.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::pitch::PitchClass;

/// Semitone offset type
pub type Semitones = i32;

/// A signed distance in semitones.
///
/// Negative values are descending, values of 12 or more are compound.
/// Names are derived from the value reduced into one octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interval(Semitones);

const SHORT_NAMES: [&str; 12] = [
    "P1", "m2", "M2", "m3", "M3", "P4", "TT", "P5", "m6", "M6", "m7", "M7",
];

const LONG_NAMES: [&str; 12] = [
    "unison",
    "minor second",
    "major second",
    "minor third",
    "major third",
    "perfect fourth",
    "tritone",
    "perfect fifth",
    "minor sixth",
    "major sixth",
    "minor seventh",
    "major seventh",
];

impl Interval {
    pub const UNISON: Interval = Interval(0);
    pub const MINOR_SECOND: Interval = Interval(1);
    pub const MAJOR_SECOND: Interval = Interval(2);
    pub const MINOR_THIRD: Interval = Interval(3);
    pub const MAJOR_THIRD: Interval = Interval(4);
    pub const PERFECT_FOURTH: Interval = Interval(5);
    pub const TRITONE: Interval = Interval(6);
    pub const PERFECT_FIFTH: Interval = Interval(7);
    pub const MINOR_SIXTH: Interval = Interval(8);
    pub const MAJOR_SIXTH: Interval = Interval(9);
    pub const MINOR_SEVENTH: Interval = Interval(10);
    pub const MAJOR_SEVENTH: Interval = Interval(11);
    pub const OCTAVE: Interval = Interval(12);

    /// Create an interval of the given number of semitones
    pub const fn new(semitones: Semitones) -> Self {
        Interval(semitones)
    }

    /// Ascending distance from one pitch class to another, in 0..12
    pub fn between(from: PitchClass, to: PitchClass) -> Self {
        let diff = to.chromatic_index() as Semitones - from.chromatic_index() as Semitones;
        Interval(diff.rem_euclid(12))
    }

    /// Number of semitones
    pub const fn semitones(self) -> Semitones {
        self.0
    }

    /// Same size, opposite direction; `i32::MIN` maps to itself
    pub const fn invert(self) -> Self {
        Interval(self.0.wrapping_neg())
    }

    /// The interval reduced into a single ascending octave (0..12)
    pub const fn simple(self) -> Self {
        Interval(self.0.rem_euclid(12))
    }

    /// True for intervals larger than an octave in either direction
    pub fn is_compound(self) -> bool {
        self.0.unsigned_abs() > 12
    }

    pub fn is_descending(self) -> bool {
        self.0 < 0
    }

    /// Short name of the reduced interval ("P1", "m3", "TT", ...)
    pub fn name(self) -> &'static str {
        SHORT_NAMES[self.simple().0 as usize]
    }

    /// Long name of the reduced interval ("minor third", ...)
    pub fn long_name(self) -> &'static str {
        LONG_NAMES[self.simple().0 as usize]
    }

    /// Sort a list of intervals into canonical ascending order
    pub fn sort(intervals: &mut [Interval]) {
        intervals.sort_unstable();
    }
}

impl From<Semitones> for Interval {
    fn from(semitones: Semitones) -> Self {
        Interval(semitones)
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        Interval(self.0 + rhs.0)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        Interval(self.0 - rhs.0)
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        self.invert()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
