// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keys: a tonic plus a major or minor pattern, with harmonic function.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chord::{Chord, ChordQuality, DEFAULT_OCTAVE};
use super::interval::{Interval, Semitones};
use super::pattern::ScalePattern;
use super::pitch::{Note, PitchClass};
use super::scale::Scale;
use super::signature::KeySignature;
use crate::error::{Result, TheoryError};

/// Major or minor tonality of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl KeyMode {
    pub fn opposite(self) -> Self {
        match self {
            KeyMode::Major => KeyMode::Minor,
            KeyMode::Minor => KeyMode::Major,
        }
    }

    /// Canonical pattern for the mode
    pub fn pattern(self) -> ScalePattern {
        match self {
            KeyMode::Major => ScalePattern::major(),
            KeyMode::Minor => ScalePattern::natural_minor(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyMode::Major => "major",
            KeyMode::Minor => "minor",
        }
    }
}

/// Harmonic function of a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

impl HarmonicFunction {
    pub fn name(self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "tonic",
            HarmonicFunction::Subdominant => "subdominant",
            HarmonicFunction::Dominant => "dominant",
        }
    }
}

impl fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

const TONIC_DEGREES: [usize; 3] = [1, 3, 6];
const SUBDOMINANT_DEGREES: [usize; 2] = [2, 4];
const DOMINANT_DEGREES: [usize; 2] = [5, 7];

// Diatonic triad tables. The diminished slots (vii° in major, ii° in
// minor) are realised as plain minor triads.
const MAJOR_NUMERALS: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];
const MAJOR_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
];
const MINOR_NUMERALS: [&str; 7] = ["i", "ii°", "III", "iv", "v", "VI", "VII"];
const MINOR_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
];

/// One diatonic chord of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiatonicChordInfo {
    /// Scale degree (1-based)
    pub degree: usize,
    pub roman_numeral: &'static str,
    pub chord: Chord,
    pub function: HarmonicFunction,
}

/// A musical key with tonic and primary pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyRepr", into = "KeyRepr")]
pub struct Key {
    mode: KeyMode,
    scale: Scale,
}

impl Key {
    /// Create a key; the pattern must have the major or natural minor shape
    pub fn new(tonic: PitchClass, pattern: ScalePattern) -> Result<Self> {
        let mode = [KeyMode::Major, KeyMode::Minor]
            .into_iter()
            .find(|mode| pattern.same_shape(&mode.pattern()))
            .ok_or_else(|| {
                TheoryError::StructuralInvariantViolation(format!(
                    "key pattern '{}' ({}) is not a major or natural minor shape",
                    pattern.name(),
                    pattern.quality()
                ))
            })?;
        Ok(Self {
            mode,
            scale: Scale::new(tonic, pattern),
        })
    }

    pub fn major(tonic: PitchClass) -> Self {
        Self::with_mode(tonic, KeyMode::Major)
    }

    pub fn minor(tonic: PitchClass) -> Self {
        Self::with_mode(tonic, KeyMode::Minor)
    }

    pub fn with_mode(tonic: PitchClass, mode: KeyMode) -> Self {
        Self {
            mode,
            scale: Scale::new(tonic, mode.pattern()),
        }
    }

    /// The key at a circle-of-fifths position: the major tonic there, or its relative minor
    pub fn from_circle_of_fifths(fifths_index: i64, mode: KeyMode) -> Result<Self> {
        let major = Key::major(PitchClass::from_circle_of_fifths(fifths_index)?);
        Ok(match mode {
            KeyMode::Major => major,
            KeyMode::Minor => major.relative_key(),
        })
    }

    /// Parse "C", "Am", "F#m", "Bb", "Eb major", "c# minor"
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (tonic_str, mode) = if let Some(rest) = strip_suffix_ignore_case(trimmed, "major") {
            (rest.trim_end(), KeyMode::Major)
        } else if let Some(rest) = strip_suffix_ignore_case(trimmed, "minor") {
            (rest.trim_end(), KeyMode::Minor)
        } else if let Some(rest) = trimmed.strip_suffix('m') {
            (rest, KeyMode::Minor)
        } else {
            (trimmed, KeyMode::Major)
        };
        let tonic =
            PitchClass::parse(tonic_str).map_err(|_| TheoryError::UnknownNoteName(s.to_string()))?;
        Ok(Key::with_mode(tonic, mode))
    }

    pub fn tonic(&self) -> PitchClass {
        self.scale.root()
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    pub fn is_major(&self) -> bool {
        self.mode == KeyMode::Major
    }

    pub fn primary_pattern(&self) -> &ScalePattern {
        self.scale.pattern()
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn key_signature(&self) -> &'static KeySignature {
        match self.mode {
            KeyMode::Major => KeySignature::for_major_tonic(self.tonic()),
            KeyMode::Minor => KeySignature::for_minor_tonic(self.tonic()),
        }
    }

    /// Circle-of-fifths position of the key's signature
    pub fn fifths_index(&self) -> u8 {
        self.key_signature().fifths_index()
    }

    /// Tonic spelled in the key's own signature
    pub fn tonic_name(&self) -> &'static str {
        self.tonic().name_for(self.key_signature())
    }

    /// "Eb major", "C# minor"
    pub fn name(&self) -> String {
        format!("{} {}", self.tonic_name(), self.mode.name())
    }

    /// "Eb", "C#m"
    pub fn short_name(&self) -> String {
        match self.mode {
            KeyMode::Major => self.tonic_name().to_string(),
            KeyMode::Minor => format!("{}m", self.tonic_name()),
        }
    }

    /// Scale tones spelled in the key's signature
    pub fn note_names(&self) -> Vec<&'static str> {
        let signature = self.key_signature();
        self.scale
            .pitch_classes()
            .iter()
            .map(|pc| pc.name_for(signature))
            .collect()
    }

    /// Harmonic function of a 1-based degree
    pub fn harmonic_function_at_degree(&self, degree: usize) -> Result<HarmonicFunction> {
        if degree == 0 || degree > self.scale.len() {
            return Err(TheoryError::degree(degree, self.scale.len()));
        }
        Ok(function_for_degree(degree))
    }

    pub fn tonic_degrees(&self) -> &'static [usize] {
        &TONIC_DEGREES
    }

    pub fn subdominant_degrees(&self) -> &'static [usize] {
        &SUBDOMINANT_DEGREES
    }

    pub fn dominant_degrees(&self) -> &'static [usize] {
        &DOMINANT_DEGREES
    }

    /// Degrees carrying a harmonic function
    pub fn degrees_with_function(&self, function: HarmonicFunction) -> &'static [usize] {
        match function {
            HarmonicFunction::Tonic => self.tonic_degrees(),
            HarmonicFunction::Subdominant => self.subdominant_degrees(),
            HarmonicFunction::Dominant => self.dominant_degrees(),
        }
    }

    /// Relative key: major goes up a major sixth to minor, minor up a minor third to major
    pub fn relative_key(&self) -> Key {
        let shift = match self.mode {
            KeyMode::Major => Interval::MAJOR_SIXTH,
            KeyMode::Minor => Interval::MINOR_THIRD,
        };
        Key::with_mode(self.tonic().transpose_by(shift), self.mode.opposite())
    }

    /// Parallel key: same tonic, opposite mode
    pub fn parallel_key(&self) -> Key {
        Key::with_mode(self.tonic(), self.mode.opposite())
    }

    /// Transpose the key by semitones
    pub fn transpose(&self, semitones: Semitones) -> Key {
        Key {
            mode: self.mode,
            scale: Scale::new(self.tonic().transpose(semitones), self.primary_pattern().clone()),
        }
    }

    /// Get the dominant key (V)
    pub fn dominant_key(&self) -> Key {
        self.transpose(7)
    }

    /// Get the subdominant key (IV)
    pub fn subdominant_key(&self) -> Key {
        self.transpose(5)
    }

    /// The seven diatonic triads in the default octave
    pub fn diatonic_chords_info(&self) -> Result<Vec<DiatonicChordInfo>> {
        self.diatonic_chords_in_octave(DEFAULT_OCTAVE)
    }

    /// The seven diatonic triads with numerals and functions, roots in `octave`
    pub fn diatonic_chords_in_octave(&self, octave: i8) -> Result<Vec<DiatonicChordInfo>> {
        let (numerals, qualities) = match self.mode {
            KeyMode::Major => (&MAJOR_NUMERALS, &MAJOR_QUALITIES),
            KeyMode::Minor => (&MINOR_NUMERALS, &MINOR_QUALITIES),
        };
        let signature = self.key_signature();

        self.scale
            .pitch_classes()
            .iter()
            .enumerate()
            .map(|(i, &pc)| -> Result<DiatonicChordInfo> {
                let degree = i + 1;
                Ok(DiatonicChordInfo {
                    degree,
                    roman_numeral: numerals[i],
                    chord: Chord::new(Note::new(pc, octave), qualities[i])?.spelled_in(signature),
                    function: function_for_degree(degree),
                })
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| TheoryError::StructuralInvariantViolation(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TheoryError::StructuralInvariantViolation(e.to_string()))
    }
}

// ASCII suffix match that never splits a multi-byte character
fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = s.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

// Both modes share the same grouping
fn function_for_degree(degree: usize) -> HarmonicFunction {
    if SUBDOMINANT_DEGREES.contains(&degree) {
        HarmonicFunction::Subdominant
    } else if DOMINANT_DEGREES.contains(&degree) {
        HarmonicFunction::Dominant
    } else {
        HarmonicFunction::Tonic
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Wire form: `{ tonic: {name}, primaryPattern: {name, type, intervals} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyRepr {
    tonic: PitchClass,
    primary_pattern: ScalePattern,
}

impl From<Key> for KeyRepr {
    fn from(key: Key) -> Self {
        KeyRepr {
            tonic: key.tonic(),
            primary_pattern: key.primary_pattern().clone(),
        }
    }
}

impl TryFrom<KeyRepr> for Key {
    type Error = TheoryError;

    fn try_from(repr: KeyRepr) -> Result<Self> {
        Key::new(repr.tonic, repr.primary_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::pattern::ScaleType;

    #[test]
    fn test_relative_key() {
        let c_major = Key::major(PitchClass::C);
        let relative = c_major.relative_key();
        assert_eq!(relative.tonic(), PitchClass::A);
        assert_eq!(relative.mode(), KeyMode::Minor);
        assert_eq!(relative.relative_key(), c_major);

        let d_minor = Key::minor(PitchClass::D);
        assert_eq!(d_minor.relative_key().tonic(), PitchClass::F);
    }

    #[test]
    fn test_relative_round_trip_all_keys() {
        for pc in PitchClass::ALL {
            for key in [Key::major(pc), Key::minor(pc)] {
                assert_eq!(key.relative_key().relative_key(), key);
                assert_eq!(key.relative_key().key_signature(), key.key_signature());
            }
        }
    }

    #[test]
    fn test_parallel_key() {
        let parallel = Key::major(PitchClass::C).parallel_key();
        assert_eq!(parallel.tonic(), PitchClass::C);
        assert_eq!(parallel.mode(), KeyMode::Minor);
        assert_eq!(parallel.fifths_index(), 9);
    }

    #[test]
    fn test_harmonic_functions() {
        let key = Key::major(PitchClass::G);
        assert_eq!(key.harmonic_function_at_degree(1).unwrap(), HarmonicFunction::Tonic);
        assert_eq!(key.harmonic_function_at_degree(4).unwrap(), HarmonicFunction::Subdominant);
        assert_eq!(key.harmonic_function_at_degree(7).unwrap(), HarmonicFunction::Dominant);
        assert!(key.harmonic_function_at_degree(0).is_err());
        assert!(key.harmonic_function_at_degree(8).is_err());

        let minor = Key::minor(PitchClass::E);
        assert_eq!(minor.harmonic_function_at_degree(6).unwrap(), HarmonicFunction::Tonic);
        assert_eq!(minor.degrees_with_function(HarmonicFunction::Dominant), &[5, 7]);
    }

    #[test]
    fn test_rejects_non_major_minor_patterns() {
        assert!(Key::new(PitchClass::C, ScaleType::WholeTone.pattern().clone()).is_err());
        assert!(Key::new(PitchClass::C, ScaleType::MajorPentatonic.pattern().clone()).is_err());
        assert!(Key::new(PitchClass::C, ScaleType::HarmonicMinor.pattern().clone()).is_err());
        assert!(Key::new(PitchClass::C, ScaleType::MelodicMinor.pattern().clone()).is_err());
    }

    #[test]
    fn test_rejects_church_modes() {
        for scale_type in [
            ScaleType::Dorian,
            ScaleType::Phrygian,
            ScaleType::Lydian,
            ScaleType::Mixolydian,
            ScaleType::Locrian,
        ] {
            assert!(matches!(
                Key::new(PitchClass::D, scale_type.pattern().clone()),
                Err(TheoryError::StructuralInvariantViolation(_))
            ));
        }
    }

    #[test]
    fn test_accepts_major_and_minor_shapes() {
        let ionian = ScalePattern::major().renamed("Ionian", "ion");
        let key = Key::new(PitchClass::G, ionian).unwrap();
        assert_eq!(key.mode(), KeyMode::Major);
        assert_eq!(key.fifths_index(), 1);

        let aeolian = Key::new(PitchClass::E, ScaleType::NaturalMinor.pattern().clone()).unwrap();
        assert_eq!(aeolian.mode(), KeyMode::Minor);
        assert_eq!(aeolian.key_signature(), Key::minor(PitchClass::E).key_signature());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Key::parse("C").unwrap(), Key::major(PitchClass::C));
        assert_eq!(Key::parse("Am").unwrap(), Key::minor(PitchClass::A));
        assert_eq!(Key::parse("F#m").unwrap(), Key::minor(PitchClass::Fs));
        assert_eq!(Key::parse("Bb").unwrap(), Key::major(PitchClass::As));
        assert_eq!(Key::parse("Eb major").unwrap(), Key::major(PitchClass::Ds));
        assert_eq!(Key::parse("c# minor").unwrap(), Key::minor(PitchClass::Cs));
        assert_eq!(Key::parse("Eb MAJOR").unwrap(), Key::major(PitchClass::Ds));
        assert_eq!(Key::parse(" G Minor ").unwrap(), Key::minor(PitchClass::G));
        assert!(Key::parse("Hm").is_err());
    }

    #[test]
    fn test_parse_non_ascii_input() {
        for input in ["ẞ major", "ẞ minor", "İ major", "♭", "C♯ MİNOR", "major", ""] {
            assert!(Key::parse(input).is_err(), "{}", input);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Key::major(PitchClass::Ds).name(), "Eb major");
        assert_eq!(Key::minor(PitchClass::Cs).short_name(), "C#m");
        assert_eq!(Key::major(PitchClass::Fs).short_name(), "F#");
        assert_eq!(Key::minor(PitchClass::As).short_name(), "Bbm");
    }

    #[test]
    fn test_from_circle_of_fifths() {
        assert_eq!(
            Key::from_circle_of_fifths(3, KeyMode::Major).unwrap(),
            Key::major(PitchClass::A)
        );
        assert_eq!(
            Key::from_circle_of_fifths(11, KeyMode::Minor).unwrap(),
            Key::minor(PitchClass::D)
        );
        assert!(Key::from_circle_of_fifths(12, KeyMode::Major).is_err());
    }

    #[test]
    fn test_diatonic_chords_major() {
        let info = Key::major(PitchClass::C).diatonic_chords_info().unwrap();
        let names: Vec<String> = info.iter().map(|i| i.chord.name()).collect();
        assert_eq!(names, vec!["C", "Dm", "Em", "F", "G", "Am", "Bm"]);
        let numerals: Vec<&str> = info.iter().map(|i| i.roman_numeral).collect();
        assert_eq!(numerals, MAJOR_NUMERALS.to_vec());
        assert_eq!(info[4].function, HarmonicFunction::Dominant);
        assert_eq!(info[3].function, HarmonicFunction::Subdominant);
        assert_eq!(info[5].function, HarmonicFunction::Tonic);
    }

    #[test]
    fn test_diatonic_chords_minor_flat_key() {
        let info = Key::minor(PitchClass::C).diatonic_chords_info().unwrap();
        let names: Vec<String> = info.iter().map(|i| i.chord.name()).collect();
        assert_eq!(names, vec!["Cm", "Dm", "Eb", "Fm", "Gm", "Ab", "Bb"]);
        assert_eq!(info[2].roman_numeral, "III");
    }

    #[test]
    fn test_diatonic_chords_octave_bounds() {
        let key = Key::major(PitchClass::C);
        let low = key.diatonic_chords_in_octave(-128).unwrap();
        assert_eq!(low[0].chord.tone_notations(), vec!["C-128", "E-128", "G-128"]);
        assert!(matches!(
            key.diatonic_chords_in_octave(127),
            Err(TheoryError::InvalidIndex { what: "octave", .. })
        ));
    }

    #[test]
    fn test_dominant_subdominant() {
        let c_major = Key::major(PitchClass::C);
        assert_eq!(c_major.dominant_key().tonic(), PitchClass::G);
        assert_eq!(c_major.subdominant_key().tonic(), PitchClass::F);
    }

    #[test]
    fn test_json_shape_and_round_trip() {
        let key = Key::minor(PitchClass::Fs);
        let json = key.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tonic"]["name"], "F#");
        assert_eq!(value["primaryPattern"]["type"], "minor");
        assert_eq!(
            value["primaryPattern"]["intervals"],
            serde_json::json!([0, 2, 3, 5, 7, 8, 10])
        );
        assert_eq!(Key::from_json(&json).unwrap(), key);
    }

    #[test]
    fn test_json_rejects_modal_pattern() {
        let json = r#"{
            "tonic": { "name": "D" },
            "primaryPattern": { "name": "Dorian", "type": "minor", "intervals": [0, 2, 3, 5, 7, 9, 10] }
        }"#;
        assert!(matches!(
            Key::from_json(json),
            Err(TheoryError::StructuralInvariantViolation(_))
        ));
    }

    #[test]
    fn test_json_rejects_non_key_pattern() {
        let json = r#"{
            "tonic": { "name": "C" },
            "primaryPattern": { "name": "Whole Tone", "type": "other", "intervals": [0, 2, 4, 6, 8, 10] }
        }"#;
        assert!(Key::from_json(json).is_err());
    }
}
