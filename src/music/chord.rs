// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords built from a root note and a quality.
//!
//! Each quality owns a fixed interval table. The constituent notes are the
//! root transposed by each entry, with the octave rolling over every twelve
//! semitones, so the first note is always the root itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::interval::{Interval, Semitones};
use super::pitch::{Accidental, MidiNote, Note, PitchClass};
use super::signature::KeySignature;
use crate::error::{Result, TheoryError};

/// Octave used when a chord is built without one
pub const DEFAULT_OCTAVE: i8 = 4;

/// Chord qualities with an interval table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    Major,
    Minor,
    MajorSeventh,
    MinorSeventh,
    DominantSeventh,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    HalfDiminished,
    DiminishedSeventh,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 11] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::DominantSeventh,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::HalfDiminished,
        ChordQuality::DiminishedSeventh,
    ];

    /// Semitones above the root for each chord tone
    pub fn intervals(self) -> &'static [Semitones] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::MajorSeventh => &[0, 4, 7, 11],
            ChordQuality::MinorSeventh => &[0, 3, 7, 10],
            ChordQuality::DominantSeventh => &[0, 4, 7, 10],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::HalfDiminished => &[0, 3, 6, 10],
            ChordQuality::DiminishedSeventh => &[0, 3, 6, 9],
        }
    }

    /// Suffix appended to the root name ("", "m", "maj7", ...)
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::HalfDiminished => "m7b5",
            ChordQuality::DiminishedSeventh => "dim7",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::MajorSeventh => "major-seventh",
            ChordQuality::MinorSeventh => "minor-seventh",
            ChordQuality::DominantSeventh => "dominant-seventh",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::HalfDiminished => "half-diminished",
            ChordQuality::DiminishedSeventh => "diminished-seventh",
        }
    }

    /// Parse a quality from its name or suffix
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let found = match trimmed {
            "" | "M" | "maj" => Some(ChordQuality::Major),
            "m" | "min" | "-" => Some(ChordQuality::Minor),
            "M7" | "Δ7" => Some(ChordQuality::MajorSeventh),
            "min7" | "-7" => Some(ChordQuality::MinorSeventh),
            "dom7" => Some(ChordQuality::DominantSeventh),
            "°" | "o" => Some(ChordQuality::Diminished),
            "+" => Some(ChordQuality::Augmented),
            "ø" | "ø7" => Some(ChordQuality::HalfDiminished),
            "°7" | "o7" => Some(ChordQuality::DiminishedSeventh),
            _ => None,
        };
        if let Some(quality) = found {
            return Ok(quality);
        }

        let lower = trimmed.to_lowercase().replace([' ', '_'], "-");
        ChordQuality::ALL
            .iter()
            .copied()
            .find(|q| q.suffix() == trimmed || q.name() == lower)
            .ok_or_else(|| TheoryError::UnsupportedChordType(s.to_string()))
    }

    /// Quality whose table matches the given intervals exactly
    pub fn from_intervals(intervals: &[Semitones]) -> Result<Self> {
        ChordQuality::ALL
            .iter()
            .copied()
            .find(|q| q.intervals() == intervals)
            .ok_or_else(|| TheoryError::UnsupportedChordType(format!("{:?}", intervals)))
    }

    /// True when the third above the root is minor
    pub fn has_minor_third(self) -> bool {
        let table = self.intervals();
        table.contains(&3) && !table.contains(&4)
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chord: root note, quality and the ordered chord tones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    root: Note,
    quality: ChordQuality,
    notes: Vec<Note>,
    spelling: Accidental,
}

impl Chord {
    /// Build a chord from its quality's interval table.
    /// Fails when an upper tone would leave the octave range.
    pub fn new(root: Note, quality: ChordQuality) -> Result<Self> {
        let notes = quality
            .intervals()
            .iter()
            .map(|&i| root.transpose_by(Interval::new(i)))
            .collect::<Result<Vec<Note>>>()?;
        trace!(root = %root, quality = %quality, "built chord");
        Ok(Self {
            root,
            quality,
            notes,
            spelling: default_spelling(root.pitch_class, quality),
        })
    }

    /// Build a chord from explicit tones, checking they fit the quality
    pub fn from_parts(root: Note, quality: ChordQuality, notes: Vec<Note>) -> Result<Self> {
        let first = notes.first().ok_or_else(|| {
            TheoryError::StructuralInvariantViolation("chord has no notes".to_string())
        })?;
        if *first != root {
            return Err(TheoryError::StructuralInvariantViolation(format!(
                "first chord tone {} is not the root {}",
                first, root
            )));
        }
        if notes.len() != quality.intervals().len() {
            return Err(TheoryError::StructuralInvariantViolation(format!(
                "{} chord needs {} tones, got {}",
                quality,
                quality.intervals().len(),
                notes.len()
            )));
        }
        Ok(Self {
            root,
            quality,
            notes,
            spelling: default_spelling(root.pitch_class, quality),
        })
    }

    /// Build from a quality name ("m7", "dominant-seventh", ...)
    pub fn from_quality_name(root: Note, quality: &str) -> Result<Self> {
        Self::new(root, ChordQuality::parse(quality)?)
    }

    pub fn major(root: Note) -> Result<Self> {
        Self::new(root, ChordQuality::Major)
    }

    pub fn minor(root: Note) -> Result<Self> {
        Self::new(root, ChordQuality::Minor)
    }

    pub fn major_seventh(root: Note) -> Result<Self> {
        Self::new(root, ChordQuality::MajorSeventh)
    }

    pub fn minor_seventh(root: Note) -> Result<Self> {
        Self::new(root, ChordQuality::MinorSeventh)
    }

    pub fn dominant_seventh(root: Note) -> Result<Self> {
        Self::new(root, ChordQuality::DominantSeventh)
    }

    pub fn diminished(root: Note) -> Result<Self> {
        Self::new(root, ChordQuality::Diminished)
    }

    /// Major triad on the tonic at a circle-of-fifths position, octave 4
    pub fn from_circle_of_fifths(fifths_index: i64) -> Result<Self> {
        let root = PitchClass::from_circle_of_fifths(fifths_index)?;
        Self::major(Note::new(root, DEFAULT_OCTAVE))
    }

    /// Minor triad on the relative minor of a circle-of-fifths position, octave 4
    pub fn relative_minor_from_circle_of_fifths(fifths_index: i64) -> Result<Self> {
        let major_root = PitchClass::from_circle_of_fifths(fifths_index)?;
        Self::minor(Note::new(
            major_root.transpose_by(Interval::MAJOR_SIXTH),
            DEFAULT_OCTAVE,
        ))
    }

    /// Same chord, root spelled with the given accidental preference
    pub fn with_spelling(mut self, spelling: Accidental) -> Self {
        self.spelling = spelling;
        self
    }

    /// Same chord, root spelled as in a key signature
    pub fn spelled_in(self, signature: &KeySignature) -> Self {
        let spelling = signature.primary_accidental();
        self.with_spelling(spelling)
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Root spelling followed by the quality suffix ("C", "Am", "Bb7")
    pub fn name(&self) -> String {
        format!(
            "{}{}",
            self.root.pitch_class.spelled(self.spelling),
            self.quality.suffix()
        )
    }

    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.notes.iter().map(|n| n.pitch_class).collect()
    }

    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.notes.iter().any(|n| n.pitch_class == pitch_class)
    }

    /// Tones as "<sharp spelling><octave>", the naming used by sample libraries
    pub fn tone_notations(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.notation()).collect()
    }

    /// MIDI numbers for the tones that fall inside the MIDI range
    pub fn midi_notes(&self) -> Vec<MidiNote> {
        self.notes.iter().filter_map(|n| n.midi()).collect()
    }

    /// Voicing with the lowest `inversion` tones moved up an octave
    pub fn inversion(&self, inversion: usize) -> Result<Vec<Note>> {
        let mut result = self.notes.clone();
        for _ in 0..inversion % self.notes.len().max(1) {
            if !result.is_empty() {
                let bottom = result.remove(0);
                result.push(bottom.transpose_by(Interval::OCTAVE)?);
            }
        }
        Ok(result)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn default_spelling(root: PitchClass, quality: ChordQuality) -> Accidental {
    let signature = if quality.has_minor_third() {
        KeySignature::for_minor_tonic(root)
    } else {
        KeySignature::for_major_tonic(root)
    };
    signature.primary_accidental()
}
