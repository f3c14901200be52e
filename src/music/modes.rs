// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Church modes and rotation utilities.
//!
//! The seven modes are rotations of the major pattern. This module builds
//! them, recognises them, checks whether two patterns are rotations of one
//! another, and orders the modes from brightest (Lydian) to darkest
//! (Locrian).

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::interval::Interval;
use super::key::Key;
use super::pattern::{ScalePattern, ScaleType};
use super::pitch::PitchClass;
use super::scale::Scale;
use super::signature::KeySignature;

/// The seven church modes, in the order of the major-scale degree they start on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurchMode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

static MODE_PATTERNS: Lazy<Vec<ScalePattern>> = Lazy::new(|| {
    let major = ScalePattern::major();
    ChurchMode::ALL
        .iter()
        .map(|m| major.rotated(m.degree(), m.name().to_string(), m.symbol().to_string()))
        .collect()
});

impl ChurchMode {
    pub const ALL: [ChurchMode; 7] = [
        ChurchMode::Ionian,
        ChurchMode::Dorian,
        ChurchMode::Phrygian,
        ChurchMode::Lydian,
        ChurchMode::Mixolydian,
        ChurchMode::Aeolian,
        ChurchMode::Locrian,
    ];

    /// Degree of the major scale the mode starts on (1-based)
    pub fn degree(self) -> usize {
        self as usize + 1
    }

    /// Mode starting on a degree of the major scale
    pub fn from_degree(degree: usize) -> Option<Self> {
        ChurchMode::ALL.get(degree.checked_sub(1)?).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ChurchMode::Ionian => "Ionian",
            ChurchMode::Dorian => "Dorian",
            ChurchMode::Phrygian => "Phrygian",
            ChurchMode::Lydian => "Lydian",
            ChurchMode::Mixolydian => "Mixolydian",
            ChurchMode::Aeolian => "Aeolian",
            ChurchMode::Locrian => "Locrian",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ChurchMode::Ionian => "ion",
            ChurchMode::Dorian => "dor",
            ChurchMode::Phrygian => "phr",
            ChurchMode::Lydian => "lyd",
            ChurchMode::Mixolydian => "mix",
            ChurchMode::Aeolian => "aeo",
            ChurchMode::Locrian => "loc",
        }
    }

    /// Position on the brightness scale: 7 for Lydian down to 1 for Locrian
    ///
    /// Each step darker lowers one more scale degree by a semitone.
    pub fn brightness(self) -> u8 {
        match self {
            ChurchMode::Lydian => 7,
            ChurchMode::Ionian => 6,
            ChurchMode::Mixolydian => 5,
            ChurchMode::Dorian => 4,
            ChurchMode::Aeolian => 3,
            ChurchMode::Phrygian => 2,
            ChurchMode::Locrian => 1,
        }
    }

    /// Pattern derived from the major scale
    pub fn pattern(self) -> &'static ScalePattern {
        &MODE_PATTERNS[self as usize]
    }

    /// The built-in scale type with the same intervals
    pub fn scale_type(self) -> ScaleType {
        match self {
            ChurchMode::Ionian => ScaleType::Major,
            ChurchMode::Dorian => ScaleType::Dorian,
            ChurchMode::Phrygian => ScaleType::Phrygian,
            ChurchMode::Lydian => ScaleType::Lydian,
            ChurchMode::Mixolydian => ScaleType::Mixolydian,
            ChurchMode::Aeolian => ScaleType::NaturalMinor,
            ChurchMode::Locrian => ScaleType::Locrian,
        }
    }

    /// Parse a mode name ("dorian", "Aeolian", "minor", ...)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "ionian" | "major" => Some(ChurchMode::Ionian),
            "dorian" => Some(ChurchMode::Dorian),
            "phrygian" => Some(ChurchMode::Phrygian),
            "lydian" => Some(ChurchMode::Lydian),
            "mixolydian" => Some(ChurchMode::Mixolydian),
            "aeolian" | "minor" => Some(ChurchMode::Aeolian),
            "locrian" => Some(ChurchMode::Locrian),
            _ => None,
        }
    }
}

impl fmt::Display for ChurchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Modes ordered brightest first
pub fn modes_by_brightness() -> Vec<ChurchMode> {
    let mut modes = ChurchMode::ALL.to_vec();
    modes.sort_by(|a, b| b.brightness().cmp(&a.brightness()));
    modes
}

/// Rotate a pattern by `steps` degrees, wrapping around its length
pub fn rotate(pattern: &ScalePattern, steps: usize) -> ScalePattern {
    if pattern.is_empty() {
        return pattern.clone();
    }
    let degree = steps % pattern.len() + 1;
    pattern.rotated(
        degree,
        pattern.name().to_string(),
        pattern.symbol().to_string(),
    )
}

/// Number of degrees `from` must be rotated to match `to`, if any
pub fn rotation_steps(from: &ScalePattern, to: &ScalePattern) -> Option<usize> {
    if from.len() != to.len() {
        return None;
    }
    (0..from.len()).find(|&steps| rotate(from, steps).same_shape(to))
}

/// True if one pattern is a rotation of the other
pub fn are_rotations(a: &ScalePattern, b: &ScalePattern) -> bool {
    rotation_steps(a, b).is_some()
}

/// The church mode with exactly this shape
pub fn identify(pattern: &ScalePattern) -> Option<ChurchMode> {
    ChurchMode::ALL
        .iter()
        .copied()
        .find(|m| m.pattern().same_shape(pattern))
}

/// Tonic of the major scale that a mode on `tonic` is drawn from
pub fn parent_major(tonic: PitchClass, mode: ChurchMode) -> PitchClass {
    let offset: Interval = ScalePattern::major().intervals()[mode.degree() - 1];
    tonic.transpose_by(offset.invert())
}

/// A modal scale on a tonic
pub fn mode_scale(tonic: PitchClass, mode: ChurchMode) -> Scale {
    Scale::new(tonic, mode.pattern().clone())
}

/// Signature shared by a mode on a tonic and its parent major
pub fn mode_signature(tonic: PitchClass, mode: ChurchMode) -> &'static KeySignature {
    KeySignature::for_major_tonic(parent_major(tonic, mode))
}

/// All seven modes on one tonic, brightest first
pub fn modes_on(tonic: PitchClass) -> Vec<(ChurchMode, Scale)> {
    modes_by_brightness()
        .into_iter()
        .map(|m| (m, mode_scale(tonic, m)))
        .collect()
}

/// The seven modes that share a key's signature, in degree order
pub fn modal_family(key: &Key) -> Vec<(ChurchMode, Scale)> {
    let parent = key.key_signature().major_tonic();
    let major = Scale::new(parent, ScalePattern::major());
    ChurchMode::ALL
        .iter()
        .zip(major.pitch_classes())
        .map(|(&m, &pc)| (m, mode_scale(pc, m)))
        .collect()
}
