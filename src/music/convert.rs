// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Conversions between the parallel views of the 12-tone space.
//!
//! Circle-of-fifths position, chromatic index, semitone distance and note
//! name all describe the same twelve pitch classes. These functions move
//! between them without any state.

use super::interval::{Interval, Semitones};
use super::key::{Key, KeyMode};
use super::pitch::{Accidental, MidiNote, Note, PitchClass};
use super::signature::KeySignature;
use crate::error::{Result, TheoryError};

/// Chromatic index of the pitch class at a circle-of-fifths position
pub fn fifths_to_chromatic(fifths_index: i64) -> Result<u8> {
    Ok(PitchClass::from_circle_of_fifths(fifths_index)?.chromatic_index())
}

/// Circle-of-fifths position of a chromatic index
pub fn chromatic_to_fifths(chromatic_index: i64) -> Result<u8> {
    Ok(PitchClass::try_from_chromatic_index(chromatic_index)?.fifths_index())
}

/// Name of the major tonic at a position, spelled in that position's signature
pub fn fifths_to_note_name(fifths_index: i64) -> Result<&'static str> {
    let signature = KeySignature::from_fifths_index(fifths_index)?;
    Ok(signature.spell(signature.major_tonic()))
}

/// Spelling of a chromatic index with the given accidental preference
pub fn chromatic_to_note_name(chromatic_index: i64, preference: Accidental) -> Result<&'static str> {
    Ok(PitchClass::try_from_chromatic_index(chromatic_index)?.spelled(preference))
}

pub fn note_name_to_chromatic(name: &str) -> Result<u8> {
    Ok(PitchClass::parse(name)?.chromatic_index())
}

pub fn note_name_to_fifths(name: &str) -> Result<u8> {
    Ok(PitchClass::parse(name)?.fifths_index())
}

/// Ascending semitones from one circle position's tonic to another's
pub fn semitones_between_positions(from_fifths: i64, to_fifths: i64) -> Result<Semitones> {
    let from = PitchClass::from_circle_of_fifths(from_fifths)?;
    let to = PitchClass::from_circle_of_fifths(to_fifths)?;
    Ok(Interval::between(from, to).semitones())
}

/// Ascending semitones between two note names
pub fn semitones_between_names(from: &str, to: &str) -> Result<Semitones> {
    Ok(Interval::between(PitchClass::parse(from)?, PitchClass::parse(to)?).semitones())
}

/// Shortest number of steps around the circle between two positions
pub fn fifths_distance(a: i64, b: i64) -> Result<u8> {
    if !(0..12).contains(&a) {
        return Err(TheoryError::fifths_index(a));
    }
    if !(0..12).contains(&b) {
        return Err(TheoryError::fifths_index(b));
    }
    let d = (a - b).rem_euclid(12) as u8;
    Ok(d.min(12 - d))
}

/// Clockwise steps around the circle that a transposition by `semitones` moves
pub fn semitones_to_fifths_steps(semitones: Semitones) -> u8 {
    (semitones * 7).rem_euclid(12) as u8
}

/// Semitones covered by moving `steps` clockwise around the circle, in 0..12
pub fn fifths_steps_to_semitones(steps: i64) -> Semitones {
    (steps * 7).rem_euclid(12) as Semitones
}

/// Short interval name for a semitone count ("P5", "m3", ...)
pub fn interval_name(semitones: Semitones) -> &'static str {
    Interval::new(semitones).name()
}

/// Key name at a circle position: "Eb" for major, "Cm" for minor
pub fn key_name_for_position(fifths_index: i64, mode: KeyMode) -> Result<String> {
    Ok(Key::from_circle_of_fifths(fifths_index, mode)?.short_name())
}

/// Circle position for a key name such as "Bb" or "Gm"
pub fn key_name_to_position(name: &str) -> Result<u8> {
    Ok(Key::parse(name)?.fifths_index())
}

/// Replace ASCII accidentals with typographic ones ("Bb7" -> "B♭7")
pub fn to_unicode_accidentals(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        match c {
            '#' => out.push('♯'),
            // A leading 'b' is the note B, not a flat
            'b' if i > 0 => out.push('♭'),
            _ => out.push(c),
        }
    }
    out
}

/// Note name with octave for a MIDI number ("C4" for 60)
pub fn midi_to_note_name(midi: MidiNote) -> String {
    Note::from_midi(midi).notation()
}

/// MIDI number for a note name with octave
pub fn note_name_to_midi(name: &str) -> Result<MidiNote> {
    let note = Note::parse(name)?;
    note.midi().ok_or(TheoryError::InvalidIndex {
        what: "MIDI note",
        value: note.absolute_semitones() as i64,
        min: 0,
        max: 127,
    })
}
