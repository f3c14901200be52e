// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord construction entry points for callers outside the theory core.

use super::chord::{Chord, ChordQuality};
use super::interval::Interval;
use super::pitch::{Note, PitchClass};
use crate::error::{Result, TheoryError};

/// Major triad on the tonic at a circle-of-fifths position
pub fn major_triad_from_position(fifths_index: i64, octave: i8) -> Result<Chord> {
    let root = PitchClass::from_circle_of_fifths(fifths_index)?;
    Chord::major(Note::new(root, octave))
}

/// Minor triad on the relative minor of a circle-of-fifths position
pub fn minor_triad_from_position(fifths_index: i64, octave: i8) -> Result<Chord> {
    let major_root = PitchClass::from_circle_of_fifths(fifths_index)?;
    let root = major_root.transpose_by(Interval::MAJOR_SIXTH);
    Chord::minor(Note::new(root, octave))
}

/// Build a chord from a symbol such as "C", "F#m", "Bbmaj7" or "Edim"
pub fn chord_from_key_name(name: &str, octave: i8) -> Result<Chord> {
    let (root, quality) = split_chord_symbol(name)?;
    Chord::new(Note::new(root, octave), quality)
}

/// Twelve major triads in circle-of-fifths order
pub fn all_major_triads(octave: i8) -> Result<Vec<Chord>> {
    (0..12)
        .map(|f| major_triad_from_position(f, octave))
        .collect()
}

/// Twelve relative-minor triads in circle-of-fifths order
pub fn all_minor_triads(octave: i8) -> Result<Vec<Chord>> {
    (0..12)
        .map(|f| minor_triad_from_position(f, octave))
        .collect()
}

/// Split a chord symbol into root and quality
fn split_chord_symbol(name: &str) -> Result<(PitchClass, ChordQuality)> {
    let trimmed = name.trim();
    let mut chars = trimmed.char_indices();
    if chars.next().is_none() {
        return Err(TheoryError::UnknownNoteName(name.to_string()));
    }
    // Root is the letter plus any accidentals right after it
    let root_end = chars
        .find(|(_, c)| !matches!(c, '#' | '♯' | 'b' | '♭'))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let (root, suffix) = trimmed.split_at(root_end);
    let root = PitchClass::parse(root)?;
    let quality = ChordQuality::parse(suffix)?;
    Ok((root, quality))
}
