// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord collections: the twelve major and minor triads, the diatonic
//! chords of a key, and chords stacked from arbitrary scales.

use super::builder;
use super::chord::Chord;
use super::key::{DiatonicChordInfo, Key, KeyMode};
use super::pitch::PitchClass;
use super::scale::Scale;
use crate::error::Result;

/// The twelve major triads in circle-of-fifths order
pub fn major_triads(octave: i8) -> Result<Vec<Chord>> {
    builder::all_major_triads(octave)
}

/// The twelve minor triads, each the relative minor of the matching major
pub fn minor_triads(octave: i8) -> Result<Vec<Chord>> {
    builder::all_minor_triads(octave)
}

/// Major and minor triads paired by circle position
pub fn circle_pairs(octave: i8) -> Result<Vec<(Chord, Chord)>> {
    Ok(major_triads(octave)?
        .into_iter()
        .zip(minor_triads(octave)?)
        .collect())
}

/// Diatonic triads of a key with numerals and harmonic functions
pub fn diatonic_chords(key: &Key) -> Result<Vec<DiatonicChordInfo>> {
    key.diatonic_chords_info()
}

pub fn diatonic_chord_names(key: &Key) -> Result<Vec<String>> {
    Ok(key
        .diatonic_chords_info()?
        .iter()
        .map(|info| info.chord.name())
        .collect())
}

/// Triads stacked in thirds on every degree of a scale
pub fn triads_in_scale(scale: &Scale, octave: i8) -> Result<Vec<Chord>> {
    (1..=scale.len())
        .map(|degree| scale.triad_at_degree(degree, octave))
        .collect()
}

/// Seventh chords stacked in thirds on every degree of a scale
pub fn sevenths_in_scale(scale: &Scale, octave: i8) -> Result<Vec<Chord>> {
    (1..=scale.len())
        .map(|degree| scale.seventh_at_degree(degree, octave))
        .collect()
}

/// Major and minor triads that contain a pitch class
pub fn triads_containing(pitch_class: PitchClass, octave: i8) -> Result<Vec<Chord>> {
    Ok(major_triads(octave)?
        .into_iter()
        .chain(minor_triads(octave)?)
        .filter(|chord| chord.contains(pitch_class))
        .collect())
}

/// Keys of the given mode whose diatonic chords include this chord's name
pub fn keys_containing(chord: &Chord, mode: KeyMode) -> Result<Vec<Key>> {
    let name = chord.name();
    let pcs = chord.pitch_classes();
    let mut keys = Vec::new();
    for f in 0..12 {
        let key = Key::from_circle_of_fifths(f, mode)?;
        let found = key
            .diatonic_chords_info()?
            .iter()
            .any(|info| info.chord.name() == name || info.chord.pitch_classes() == pcs);
        if found {
            keys.push(key);
        }
    }
    Ok(keys)
}
