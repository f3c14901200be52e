// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! Pitch classes, intervals and key signatures at the bottom; scale
//! patterns, scales and keys above them; chords on top. The remaining
//! modules are stateless services composed from those values.

pub mod builder;
pub mod chord;
pub mod collection;
pub mod convert;
pub mod interval;
pub mod key;
pub mod modes;
pub mod pattern;
pub mod pitch;
pub mod progression;
pub mod scale;
pub mod signature;

pub use chord::{Chord, ChordQuality, DEFAULT_OCTAVE};
pub use interval::{Interval, Semitones};
pub use key::{DiatonicChordInfo, HarmonicFunction, Key, KeyMode};
pub use modes::ChurchMode;
pub use pattern::{CustomScaleDefinition, PatternQuality, ScalePattern, ScaleRegistry, ScaleType};
pub use pitch::{Accidental, MidiNote, Note, PitchClass};
pub use progression::{NamedProgression, Progression, ProgressionGenerator};
pub use scale::Scale;
pub use signature::KeySignature;
