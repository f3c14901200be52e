// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Concrete scales: a root pitch class plus a pattern.
//!
//! Provides note-to-scale-degree mapping, transposition within scales,
//! quantizing, stacked-third chords on each degree, and spelling of the
//! scale's notes from its key signature.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chord::{Chord, ChordQuality};
use super::interval::Interval;
use super::pattern::{PatternQuality, ScalePattern, ScaleType};
use super::pitch::{MidiNote, Note, PitchClass};
use super::signature::KeySignature;
use crate::error::{Result, TheoryError};

/// A complete scale with root and pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScaleRepr", into = "ScaleRepr")]
pub struct Scale {
    root: PitchClass,
    pattern: ScalePattern,
    notes: Vec<PitchClass>,
}

impl Scale {
    /// Create a new scale from root and pattern
    pub fn new(root: PitchClass, pattern: ScalePattern) -> Self {
        let notes: Vec<PitchClass> = pattern
            .intervals()
            .iter()
            .map(|&i| root.transpose_by(i))
            .collect();

        Self {
            root,
            pattern,
            notes,
        }
    }

    /// Create a scale from a built-in type
    pub fn from_type(root: PitchClass, scale_type: ScaleType) -> Self {
        Self::new(root, scale_type.pattern().clone())
    }

    /// Parse a scale from strings (e.g., "C", "major")
    pub fn parse(root_str: &str, scale_str: &str) -> Result<Self> {
        let root = PitchClass::parse(root_str)?;
        let scale_type = ScaleType::parse(scale_str)
            .ok_or_else(|| TheoryError::UnknownNoteName(scale_str.to_string()))?;
        Ok(Scale::from_type(root, scale_type))
    }

    /// Get the root pitch class
    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn pattern(&self) -> &ScalePattern {
        &self.pattern
    }

    /// Get the intervals (semitones from root)
    pub fn intervals(&self) -> &[Interval] {
        self.pattern.intervals()
    }

    /// Get the pitch classes in this scale
    pub fn pitch_classes(&self) -> &[PitchClass] {
        &self.notes
    }

    /// Get the number of notes in this scale
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if this scale is empty (shouldn't happen normally)
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if a pitch class is in this scale
    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.notes.contains(&pitch_class)
    }

    /// Check if a MIDI note is in this scale
    pub fn contains_midi(&self, midi_note: MidiNote) -> bool {
        self.contains(PitchClass::from_chromatic_index(midi_note % 12))
    }

    /// Get the scale degree (1-based) for a pitch class, if it's in the scale
    pub fn degree_of(&self, pitch_class: PitchClass) -> Option<usize> {
        self.notes
            .iter()
            .position(|&n| n == pitch_class)
            .map(|i| i + 1)
    }

    /// Get the pitch class at a given scale degree (1-based)
    pub fn pitch_class_at_degree(&self, degree: usize) -> Result<PitchClass> {
        if degree == 0 || degree > self.len() {
            return Err(TheoryError::degree(degree, self.len()));
        }
        Ok(self.notes[degree - 1])
    }

    /// Get a MIDI note at a given scale degree and octave
    /// Degree is 1-based, octave uses MIDI convention (middle C = C4 = 60)
    pub fn midi_note_at(&self, degree: usize, octave: i8) -> Option<MidiNote> {
        let pitch_class = self.pitch_class_at_degree(degree).ok()?;
        Note::new(pitch_class, octave).midi()
    }

    /// Move a MIDI note by scale degrees (positive = up, negative = down).
    ///
    /// Off-scale notes snap to the nearest scale tone first. Octaves are
    /// counted from the scale root, so A major steps A4, B4, C#5. Returns
    /// `None` when the result leaves the MIDI range.
    pub fn transpose_in_scale(&self, midi_note: MidiNote, degrees: i32) -> Option<MidiNote> {
        let start = self.quantize(midi_note);
        let index = self
            .notes
            .iter()
            .position(|&n| n == PitchClass::from_chromatic_index(start % 12))?;
        let intervals = self.pattern.intervals();
        let len = self.len() as i64;

        // Root at or below the starting tone
        let root = start as i64 - intervals[index].semitones() as i64;
        let target = index as i64 + degrees as i64;
        let midi = root
            + target.div_euclid(len) * 12
            + intervals[target.rem_euclid(len) as usize].semitones() as i64;
        MidiNote::try_from(midi).ok().filter(|&m| m <= 127)
    }

    /// Snap a MIDI note to the closest scale tone, looking one octave either
    /// side so B can snap up to the next C. Ties go to the lower tone.
    pub fn quantize(&self, midi_note: MidiNote) -> MidiNote {
        let midi = midi_note.min(127) as i32;
        let octave_base = midi - midi % 12;
        self.notes
            .iter()
            .flat_map(|pc| {
                let tone = octave_base + pc.chromatic_index() as i32;
                [tone - 12, tone, tone + 12]
            })
            .filter(|tone| (0..=127).contains(tone))
            .min_by_key(|&tone| ((tone - midi).abs(), tone))
            .map_or(midi as MidiNote, |tone| tone as MidiNote)
    }

    /// The key signature whose accidentals spell this scale
    ///
    /// Church modes take the signature of their parent major scale, minor
    /// shapes that of their relative major, everything else the major
    /// signature on the root.
    pub fn key_signature(&self) -> &'static KeySignature {
        let mode_degree = ScaleType::identify(&self.pattern).and_then(|st| st.major_mode_degree());
        if let Some(degree) = mode_degree {
            let offset = ScaleType::Major.pattern().intervals()[degree - 1];
            return KeySignature::for_major_tonic(self.root.transpose_by(offset.invert()));
        }
        match self.pattern.quality() {
            PatternQuality::Minor => KeySignature::for_minor_tonic(self.root),
            PatternQuality::Diminished => KeySignature::for_major_tonic(self.root.transpose(1)),
            PatternQuality::Major | PatternQuality::Other => {
                KeySignature::for_major_tonic(self.root)
            }
        }
    }

    /// Scale tones spelled from the key signature
    pub fn note_names(&self) -> Vec<&'static str> {
        let signature = self.key_signature();
        self.notes.iter().map(|pc| pc.name_for(signature)).collect()
    }

    /// Triad stacked in thirds from a degree, with its exact quality
    pub fn triad_at_degree(&self, degree: usize, octave: i8) -> Result<Chord> {
        self.stacked_chord(degree, octave, 3)
    }

    /// Seventh chord stacked in thirds from a degree
    pub fn seventh_at_degree(&self, degree: usize, octave: i8) -> Result<Chord> {
        self.stacked_chord(degree, octave, 4)
    }

    fn stacked_chord(&self, degree: usize, octave: i8, tones: usize) -> Result<Chord> {
        let root = self.pitch_class_at_degree(degree)?;
        let intervals: Vec<i32> = (0..tones)
            .map(|k| {
                let pc = self.notes[(degree - 1 + 2 * k) % self.len()];
                let semis = Interval::between(root, pc).semitones();
                // Each stacked tone sits above the previous one
                if k > 0 && semis == 0 {
                    12
                } else {
                    semis
                }
            })
            .collect();
        let quality = ChordQuality::from_intervals(&intervals)?;
        Ok(Chord::new(Note::new(root, octave), quality)?.spelled_in(self.key_signature()))
    }

    /// Get the parallel scale (major <-> minor)
    pub fn parallel(&self) -> Option<Scale> {
        ScaleType::identify(&self.pattern)
            .and_then(|st| st.parallel())
            .map(|st| Scale::from_type(self.root, st))
    }

    /// Get the relative scale (e.g., C major -> A minor)
    pub fn relative(&self) -> Option<Scale> {
        match ScaleType::identify(&self.pattern)? {
            ScaleType::Major => Some(Scale::from_type(
                self.root.transpose_by(Interval::MAJOR_SIXTH),
                ScaleType::NaturalMinor,
            )),
            ScaleType::NaturalMinor => Some(Scale::from_type(
                self.root.transpose_by(Interval::MINOR_THIRD),
                ScaleType::Major,
            )),
            _ => None,
        }
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

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.root.name_for(self.key_signature()),
            self.pattern
        )
    }
}

/// Wire form: `{ root: {name}, pattern: {name, type, intervals} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScaleRepr {
    root: PitchClass,
    pattern: ScalePattern,
}

impl From<Scale> for ScaleRepr {
    fn from(scale: Scale) -> Self {
        ScaleRepr {
            root: scale.root,
            pattern: scale.pattern,
        }
    }
}

impl TryFrom<ScaleRepr> for Scale {
    type Error = TheoryError;

    fn try_from(repr: ScaleRepr) -> Result<Self> {
        Ok(Scale::new(repr.root, repr.pattern))
    }
}
