// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key signatures derived from a circle-of-fifths position.
//!
//! Positions 1 through 6 carry sharps, 7 through 11 carry flats. Position 6
//! sits on the boundary of both ranges; it is treated as sharp (F# major,
//! six sharps) everywhere in this crate. All twelve signatures are built
//! together the first time the table is touched and are read-only after.

use std::fmt;

use once_cell::sync::Lazy;
use tracing::debug;

use super::pitch::{Accidental, PitchClass};
use crate::error::{Result, TheoryError};

/// Order in which sharps are added
pub const SHARP_ORDER: [PitchClass; 7] = [
    PitchClass::F,
    PitchClass::C,
    PitchClass::G,
    PitchClass::D,
    PitchClass::A,
    PitchClass::E,
    PitchClass::B,
];

/// Order in which flats are added (the sharp order reversed)
pub const FLAT_ORDER: [PitchClass; 7] = [
    PitchClass::B,
    PitchClass::E,
    PitchClass::A,
    PitchClass::D,
    PitchClass::G,
    PitchClass::C,
    PitchClass::F,
];

/// Highest position that is spelled with sharps
const LAST_SHARP_POSITION: u8 = 6;

static SIGNATURES: Lazy<[KeySignature; 12]> = Lazy::new(|| {
    let table = std::array::from_fn(|i| KeySignature::build(i as u8));
    debug!("built key signature table");
    table
});

/// The accidentals implied by a circle-of-fifths position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySignature {
    fifths_index: u8,
    primary_accidental: Accidental,
    /// Letter-name pitch classes that carry an accidental, in signature order
    accidentals: Vec<(PitchClass, Accidental)>,
}

impl KeySignature {
    fn build(fifths_index: u8) -> Self {
        let (primary_accidental, accidentals) = match fifths_index {
            0 => (Accidental::Natural, Vec::new()),
            1..=LAST_SHARP_POSITION => (
                Accidental::Sharp,
                SHARP_ORDER[..fifths_index as usize]
                    .iter()
                    .map(|&pc| (pc, Accidental::Sharp))
                    .collect(),
            ),
            _ => (
                Accidental::Flat,
                FLAT_ORDER[..(12 - fifths_index) as usize]
                    .iter()
                    .map(|&pc| (pc, Accidental::Flat))
                    .collect(),
            ),
        };

        Self {
            fifths_index,
            primary_accidental,
            accidentals,
        }
    }

    /// The canonical signature for a circle-of-fifths position (0..=11)
    pub fn from_fifths_index(fifths_index: i64) -> Result<&'static KeySignature> {
        if !(0..12).contains(&fifths_index) {
            return Err(TheoryError::fifths_index(fifths_index));
        }
        Ok(&SIGNATURES[fifths_index as usize])
    }

    /// The signature of the major key on a tonic
    pub fn for_major_tonic(tonic: PitchClass) -> &'static KeySignature {
        &SIGNATURES[tonic.fifths_index() as usize]
    }

    /// The signature of the natural minor key on a tonic
    pub fn for_minor_tonic(tonic: PitchClass) -> &'static KeySignature {
        Self::for_major_tonic(tonic.transpose(3))
    }

    /// All twelve signatures in circle-of-fifths order
    pub fn all() -> &'static [KeySignature; 12] {
        &SIGNATURES
    }

    pub fn fifths_index(&self) -> u8 {
        self.fifths_index
    }

    /// Sharp, flat, or natural when there are no accidentals
    pub fn primary_accidental(&self) -> Accidental {
        self.primary_accidental
    }

    /// Accidentals in the order they are written
    pub fn accidentals(&self) -> &[(PitchClass, Accidental)] {
        &self.accidentals
    }

    /// Accidental applied to a letter-name pitch class, if any
    pub fn accidental_for(&self, pitch_class: PitchClass) -> Option<Accidental> {
        self.accidentals
            .iter()
            .find(|(pc, _)| *pc == pitch_class)
            .map(|(_, acc)| *acc)
    }

    /// Number of accidentals
    pub fn len(&self) -> usize {
        self.accidentals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accidentals.is_empty()
    }

    /// The major tonic at this position
    pub fn major_tonic(&self) -> PitchClass {
        PitchClass::from_chromatic_index(self.fifths_index * 7 % 12)
    }

    /// The relative minor tonic at this position
    pub fn minor_tonic(&self) -> PitchClass {
        self.major_tonic().transpose(9)
    }

    /// Spell a pitch class in this signature
    pub fn spell(&self, pitch_class: PitchClass) -> &'static str {
        pitch_class.name_for(self)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accidentals.is_empty() {
            return write!(f, "no accidentals");
        }
        let names: Vec<String> = self
            .accidentals
            .iter()
            .map(|(pc, acc)| format!("{}{}", pc.sharp_name(), acc.symbol()))
            .collect();
        write!(f, "{}", names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_signature() {
        let sig = KeySignature::from_fifths_index(0).unwrap();
        assert!(sig.is_empty());
        assert_eq!(sig.primary_accidental(), Accidental::Natural);
        assert_eq!(sig.major_tonic(), PitchClass::C);
        assert_eq!(sig.minor_tonic(), PitchClass::A);
    }

    #[test]
    fn test_sharp_signatures() {
        for k in 1..=5 {
            let sig = KeySignature::from_fifths_index(k).unwrap();
            assert_eq!(sig.len(), k as usize);
            assert!(sig.accidentals().iter().all(|(_, a)| *a == Accidental::Sharp));
            assert_eq!(sig.primary_accidental(), Accidental::Sharp);
        }
        let d_major = KeySignature::from_fifths_index(2).unwrap();
        assert_eq!(d_major.accidental_for(PitchClass::F), Some(Accidental::Sharp));
        assert_eq!(d_major.accidental_for(PitchClass::C), Some(Accidental::Sharp));
        assert_eq!(d_major.accidental_for(PitchClass::G), None);
    }

    #[test]
    fn test_flat_signatures() {
        for k in 7..=11 {
            let sig = KeySignature::from_fifths_index(k).unwrap();
            assert_eq!(sig.len(), (12 - k) as usize);
            assert!(sig.accidentals().iter().all(|(_, a)| *a == Accidental::Flat));
            assert_eq!(sig.primary_accidental(), Accidental::Flat);
        }
        let f_major = KeySignature::from_fifths_index(11).unwrap();
        assert_eq!(f_major.accidentals(), &[(PitchClass::B, Accidental::Flat)]);
        assert_eq!(f_major.major_tonic(), PitchClass::F);
    }

    #[test]
    fn test_tritone_position_is_sharp() {
        let sig = KeySignature::from_fifths_index(6).unwrap();
        assert_eq!(sig.primary_accidental(), Accidental::Sharp);
        assert_eq!(sig.len(), 6);
        assert_eq!(sig.spell(PitchClass::Fs), "F#");
    }

    #[test]
    fn test_never_mixed_and_sized() {
        for sig in KeySignature::all() {
            let sharps = sig.accidentals().iter().any(|(_, a)| *a == Accidental::Sharp);
            let flats = sig.accidentals().iter().any(|(_, a)| *a == Accidental::Flat);
            assert!(!(sharps && flats));
            let k = sig.fifths_index() as usize;
            assert_eq!(sig.len(), k.min(12 - k));
        }
    }

    #[test]
    fn test_flyweight() {
        let a = KeySignature::from_fifths_index(3).unwrap();
        let b = KeySignature::from_fifths_index(3).unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_out_of_range() {
        assert!(KeySignature::from_fifths_index(12).is_err());
        assert!(KeySignature::from_fifths_index(-3).is_err());
    }

    #[test]
    fn test_flat_order_reverses_sharp_order() {
        let mut reversed = SHARP_ORDER;
        reversed.reverse();
        assert_eq!(reversed, FLAT_ORDER);
    }

    #[test]
    fn test_minor_tonic_lookup() {
        assert_eq!(KeySignature::for_minor_tonic(PitchClass::A).fifths_index(), 0);
        assert_eq!(KeySignature::for_minor_tonic(PitchClass::D).fifths_index(), 11);
        assert_eq!(KeySignature::for_minor_tonic(PitchClass::E).fifths_index(), 1);
    }

    #[test]
    fn test_display() {
        let sig = KeySignature::from_fifths_index(10).unwrap();
        assert_eq!(sig.to_string(), "Bb Eb");
    }
}
