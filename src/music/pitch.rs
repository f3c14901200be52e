// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes, accidentals and octave-placed notes.
//!
//! The twelve pitch classes form a closed enum, so every instance is a
//! singleton and equality is by chromatic index. Each pitch class knows its
//! position in chromatic order and on the circle of fifths, plus a sharp
//! and a flat spelling. Which spelling is shown is decided by a
//! [`KeySignature`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::interval::{Interval, Semitones};
use super::signature::KeySignature;
use crate::error::{Result, TheoryError};

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Accidental attached to a spelling or a key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    Sharp,
    Flat,
    Natural,
}

impl Accidental {
    /// ASCII symbol ("#", "b" or "")
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::Natural => "",
        }
    }

    /// Typographic symbol ("♯", "♭" or "♮")
    pub fn unicode_symbol(self) -> &'static str {
        match self {
            Accidental::Sharp => "♯",
            Accidental::Flat => "♭",
            Accidental::Natural => "♮",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Accidental::Sharp => "sharp",
            Accidental::Flat => "flat",
            Accidental::Natural => "natural",
        }
    }

    pub fn plural_name(self) -> &'static str {
        match self {
            Accidental::Sharp => "sharps",
            Accidental::Flat => "flats",
            Accidental::Natural => "naturals",
        }
    }
}

/// The twelve pitch classes in chromatic order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PitchClassRepr", into = "PitchClassRepr")]
pub enum PitchClass {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Position in semitone order, C = 0
    pub const fn chromatic_index(self) -> u8 {
        self as u8
    }

    /// Position on the circle of fifths, C = 0, G = 1, ... F = 11
    ///
    /// Seven is its own inverse modulo 12, so the same multiplication maps
    /// in both directions.
    pub const fn fifths_index(self) -> u8 {
        (self as u8 * 7) % 12
    }

    /// Pitch class for a chromatic index; the index is reduced modulo 12
    pub fn from_chromatic_index(index: u8) -> Self {
        PitchClass::ALL[(index % 12) as usize]
    }

    /// Pitch class for an exact chromatic index in 0..=11
    pub fn try_from_chromatic_index(index: i64) -> Result<Self> {
        if !(0..12).contains(&index) {
            return Err(TheoryError::chromatic_index(index));
        }
        Ok(PitchClass::ALL[index as usize])
    }

    /// Pitch class at a position on the circle of fifths (0..=11)
    pub fn from_circle_of_fifths(fifths_index: i64) -> Result<Self> {
        if !(0..12).contains(&fifths_index) {
            return Err(TheoryError::fifths_index(fifths_index));
        }
        let chromatic = (fifths_index * 7).rem_euclid(12);
        PitchClass::ALL
            .iter()
            .copied()
            .find(|pc| pc.chromatic_index() as i64 == chromatic)
            .ok_or(TheoryError::fifths_index(fifths_index))
    }

    /// Spelling with sharps ("C#")
    pub fn sharp_name(self) -> &'static str {
        SHARP_NAMES[self as usize]
    }

    /// Spelling with flats ("Db")
    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self as usize]
    }

    /// Spelling using the given accidental preference
    pub fn spelled(self, preference: Accidental) -> &'static str {
        match preference {
            Accidental::Flat => self.flat_name(),
            Accidental::Sharp | Accidental::Natural => self.sharp_name(),
        }
    }

    /// Spelling appropriate for a key signature; naturals default to sharps
    pub fn name_for(self, signature: &KeySignature) -> &'static str {
        self.spelled(signature.primary_accidental())
    }

    /// True for the seven letter-name pitch classes
    pub fn is_natural(self) -> bool {
        self.sharp_name().len() == 1
    }

    /// Transpose by an interval, wrapping into the octave
    pub fn transpose_by(self, interval: Interval) -> Self {
        self.transpose(interval.semitones())
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        let new_pc = (self.chromatic_index() as Semitones + semitones).rem_euclid(12);
        PitchClass::ALL[new_pc as usize]
    }

    /// Get interval in semitones to another pitch class (ascending)
    pub fn interval_to(self, other: PitchClass) -> Interval {
        Interval::between(self, other)
    }

    /// Parse a spelling such as "C", "C#", "Db", "F♯", "Cs" or "E#"
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| TheoryError::UnknownNoteName(s.to_string()))?;

        let base: Semitones = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(TheoryError::UnknownNoteName(s.to_string())),
        };

        let mut offset: Semitones = 0;
        for c in chars {
            match c {
                '#' | '♯' | 's' | 'S' => offset += 1,
                'b' | '♭' => offset -= 1,
                _ => return Err(TheoryError::UnknownNoteName(s.to_string())),
            }
        }
        if offset.abs() > 2 {
            return Err(TheoryError::UnknownNoteName(s.to_string()));
        }

        Ok(PitchClass::ALL[(base + offset).rem_euclid(12) as usize])
    }
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        PitchClass::parse(s)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sharp_name())
    }
}

/// Wire form of a pitch class: `{ "name": "C#" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PitchClassRepr {
    name: String,
}

impl From<PitchClass> for PitchClassRepr {
    fn from(pc: PitchClass) -> Self {
        PitchClassRepr {
            name: pc.sharp_name().to_string(),
        }
    }
}

impl TryFrom<PitchClassRepr> for PitchClass {
    type Error = TheoryError;

    fn try_from(repr: PitchClassRepr) -> Result<Self> {
        PitchClass::parse(&repr.name)
    }
}

/// A pitch class placed in an octave (scientific pitch notation, C4 = middle C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i8,
}

impl Note {
    pub const fn new(pitch_class: PitchClass, octave: i8) -> Self {
        Self {
            pitch_class,
            octave,
        }
    }

    /// Semitones above C-1 (the MIDI convention), may be out of MIDI range
    pub fn absolute_semitones(self) -> Semitones {
        (self.octave as Semitones + 1) * 12 + self.pitch_class.chromatic_index() as Semitones
    }

    /// MIDI note number, if the note lies in 0..=127
    pub fn midi(self) -> Option<MidiNote> {
        let midi = self.absolute_semitones();
        if !(0..=127).contains(&midi) {
            return None;
        }
        Some(midi as MidiNote)
    }

    /// Note for a MIDI number
    pub fn from_midi(midi: MidiNote) -> Self {
        Note::new(
            PitchClass::from_chromatic_index(midi % 12),
            (midi / 12) as i8 - 1,
        )
    }

    /// Transpose by an interval; the octave rolls over every 12 semitones.
    /// Fails when the resulting octave does not fit in an `i8`.
    pub fn transpose_by(self, interval: Interval) -> Result<Self> {
        let total = self.octave as i64 * 12
            + self.pitch_class.chromatic_index() as i64
            + interval.semitones() as i64;
        let octave = total.div_euclid(12);
        let octave = i8::try_from(octave).map_err(|_| TheoryError::octave(octave))?;
        Ok(Note::new(PitchClass::ALL[total.rem_euclid(12) as usize], octave))
    }

    /// Sharp spelling followed by the octave ("C4", "F#3")
    pub fn notation(self) -> String {
        format!("{}{}", self.pitch_class.sharp_name(), self.octave)
    }

    /// Spelling under a key signature followed by the octave ("Db4")
    pub fn notation_for(self, signature: &KeySignature) -> String {
        format!("{}{}", self.pitch_class.name_for(signature), self.octave)
    }

    /// Parse "C4", "F#3", "Bb-1"
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| TheoryError::UnknownNoteName(s.to_string()))?;

        let (name, octave) = trimmed.split_at(split);
        let pitch_class = PitchClass::parse(name)?;
        let octave: i8 = octave
            .parse()
            .map_err(|_| TheoryError::UnknownNoteName(s.to_string()))?;
        Ok(Note::new(pitch_class, octave))
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Note::parse(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
