// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord progressions realised from a key's diatonic chords.
//!
//! Supports the common functional progressions by name and random
//! in-key progressions from a seedable generator.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::chord::Chord;
use super::key::{DiatonicChordInfo, Key};
use crate::error::{Result, TheoryError};

/// Common functional progressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedProgression {
    /// I-IV-V-I
    Plagal,
    /// I-V-vi-IV
    Pop,
    /// ii-V-I
    TwoFiveOne,
    /// I-vi-IV-V
    Doowop,
    /// I-IV-vi-V
    Anthem,
}

impl NamedProgression {
    pub const ALL: [NamedProgression; 5] = [
        NamedProgression::Plagal,
        NamedProgression::Pop,
        NamedProgression::TwoFiveOne,
        NamedProgression::Doowop,
        NamedProgression::Anthem,
    ];

    /// Scale degrees of the progression (1-based)
    pub fn degrees(self) -> &'static [usize] {
        match self {
            NamedProgression::Plagal => &[1, 4, 5, 1],
            NamedProgression::Pop => &[1, 5, 6, 4],
            NamedProgression::TwoFiveOne => &[2, 5, 1],
            NamedProgression::Doowop => &[1, 6, 4, 5],
            NamedProgression::Anthem => &[1, 4, 6, 5],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedProgression::Plagal => "I-IV-V-I",
            NamedProgression::Pop => "I-V-vi-IV",
            NamedProgression::TwoFiveOne => "ii-V-I",
            NamedProgression::Doowop => "I-vi-IV-V",
            NamedProgression::Anthem => "I-IV-vi-V",
        }
    }

    /// Parse from the numeral form ("ii-V-I") or a nickname ("pop")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(found) = NamedProgression::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
        {
            return Some(found);
        }
        match s.to_lowercase().as_str() {
            "plagal" | "1451" => Some(NamedProgression::Plagal),
            "pop" | "1564" => Some(NamedProgression::Pop),
            "jazz" | "251" => Some(NamedProgression::TwoFiveOne),
            "doowop" | "1645" => Some(NamedProgression::Doowop),
            "anthem" | "1465" => Some(NamedProgression::Anthem),
            _ => None,
        }
    }
}

impl fmt::Display for NamedProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A sequence of diatonic chords in one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    key: Key,
    steps: Vec<DiatonicChordInfo>,
}

impl Progression {
    /// Realise scale degrees as diatonic chords with roots in `octave`
    pub fn from_degrees(key: &Key, degrees: &[usize], octave: i8) -> Result<Self> {
        let diatonic = key.diatonic_chords_in_octave(octave)?;
        let steps = degrees
            .iter()
            .map(|&degree| {
                degree
                    .checked_sub(1)
                    .and_then(|i| diatonic.get(i))
                    .cloned()
                    .ok_or_else(|| TheoryError::degree(degree, diatonic.len()))
            })
            .collect::<Result<Vec<_>>>()?;
        trace!(key = %key.name(), ?degrees, "realised progression");
        Ok(Self {
            key: key.clone(),
            steps,
        })
    }

    pub fn named(key: &Key, progression: NamedProgression, octave: i8) -> Result<Self> {
        Self::from_degrees(key, progression.degrees(), octave)
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn steps(&self) -> &[DiatonicChordInfo] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn degrees(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.degree).collect()
    }

    pub fn chords(&self) -> Vec<&Chord> {
        self.steps.iter().map(|s| &s.chord).collect()
    }

    pub fn chord_names(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.chord.name()).collect()
    }

    pub fn roman_numerals(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.roman_numeral).collect()
    }

    /// The same degrees realised in another key
    pub fn in_key(&self, key: &Key) -> Result<Self> {
        let octave = self
            .steps
            .first()
            .map(|s| s.chord.root().octave)
            .unwrap_or(super::chord::DEFAULT_OCTAVE);
        Self::from_degrees(key, &self.degrees(), octave)
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chord_names().join(" - "))
    }
}

/// Random progression source
pub struct ProgressionGenerator {
    rng: StdRng,
}

impl ProgressionGenerator {
    /// Seeded generators repeat their output; unseeded ones draw from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Pick one of the named progressions
    pub fn pick_named(&mut self) -> NamedProgression {
        NamedProgression::ALL[self.rng.gen_range(0..NamedProgression::ALL.len())]
    }

    /// Random chords in key, opening on the tonic
    pub fn random_in_key(&mut self, key: &Key, length: usize, octave: i8) -> Result<Progression> {
        let degrees: Vec<usize> = (0..length)
            .map(|i| if i == 0 { 1 } else { self.rng.gen_range(1..=7) })
            .collect();
        trace!(key = %key.name(), ?degrees, "random progression");
        Progression::from_degrees(key, &degrees, octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::pitch::PitchClass;

    #[test]
    fn test_named_in_c_major() {
        let key = Key::major(PitchClass::C);
        let p = Progression::named(&key, NamedProgression::Doowop, 4).unwrap();
        assert_eq!(p.chord_names(), vec!["C", "Am", "F", "G"]);
        assert_eq!(p.roman_numerals(), vec!["I", "vi", "IV", "V"]);

        let p = Progression::named(&key, NamedProgression::TwoFiveOne, 4).unwrap();
        assert_eq!(p.chord_names(), vec!["Dm", "G", "C"]);
    }

    #[test]
    fn test_named_in_flat_key() {
        let key = Key::major(PitchClass::As);
        let p = Progression::named(&key, NamedProgression::Pop, 3).unwrap();
        assert_eq!(p.chord_names(), vec!["Bb", "F", "Gm", "Eb"]);
    }

    #[test]
    fn test_from_degrees_validates() {
        let key = Key::minor(PitchClass::A);
        let p = Progression::from_degrees(&key, &[1, 4, 5], 3).unwrap();
        assert_eq!(p.chord_names(), vec!["Am", "Dm", "Em"]);
        assert!(matches!(
            Progression::from_degrees(&key, &[1, 8], 3),
            Err(TheoryError::InvalidIndex { value: 8, .. })
        ));
        assert!(Progression::from_degrees(&key, &[0], 3).is_err());
    }

    #[test]
    fn test_in_key() {
        let c = Progression::named(&Key::major(PitchClass::C), NamedProgression::Plagal, 4).unwrap();
        let g = c.in_key(&Key::major(PitchClass::G)).unwrap();
        assert_eq!(g.chord_names(), vec!["G", "C", "D", "G"]);
        assert_eq!(g.degrees(), c.degrees());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(NamedProgression::parse("ii-V-I"), Some(NamedProgression::TwoFiveOne));
        assert_eq!(NamedProgression::parse("I-V-VI-IV"), Some(NamedProgression::Pop));
        assert_eq!(NamedProgression::parse("pop"), Some(NamedProgression::Pop));
        assert_eq!(NamedProgression::parse("nope"), None);
    }

    #[test]
    fn test_seeded_random_is_repeatable() {
        let key = Key::major(PitchClass::D);
        let a = ProgressionGenerator::new(Some(42)).random_in_key(&key, 8, 3).unwrap();
        let b = ProgressionGenerator::new(Some(42)).random_in_key(&key, 8, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert_eq!(a.degrees()[0], 1);
        assert!(a.degrees().iter().all(|d| (1..=7).contains(d)));
    }

    #[test]
    fn test_top_octave_progression_fails() {
        let key = Key::major(PitchClass::G);
        assert!(matches!(
            Progression::named(&key, NamedProgression::Pop, 127),
            Err(TheoryError::InvalidIndex { what: "octave", .. })
        ));
        assert!(ProgressionGenerator::new(Some(1)).random_in_key(&key, 4, 127).is_err());
    }
}
