// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for fifths
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Circle and chromatic conversions
//! - Signature table lookups
//! - Chord and diatonic harmony construction
//! - Pattern rotation and mode recognition

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fifths::music::{
    builder, convert, modes, Chord, ChurchMode, Key, KeyMode, KeySignature, Note, PitchClass,
    Scale, ScalePattern, ScaleType,
};

fn bench_conversions(c: &mut Criterion) {
    c.bench_function("fifths_to_chromatic_all", |b| {
        b.iter(|| {
            for f in 0..12 {
                black_box(convert::fifths_to_chromatic(black_box(f)).ok());
            }
        })
    });

    c.bench_function("note_name_parse", |b| {
        b.iter(|| {
            for name in ["C", "F#", "Bb", "Ebb", "B♭", "Cs"] {
                black_box(PitchClass::parse(black_box(name)).ok());
            }
        })
    });
}

fn bench_signatures(c: &mut Criterion) {
    // Build the table before timing
    let _ = KeySignature::all();

    c.bench_function("signature_lookup", |b| {
        b.iter(|| {
            for f in 0..12 {
                black_box(KeySignature::from_fifths_index(black_box(f)).ok());
            }
        })
    });
}

fn bench_chords(c: &mut Criterion) {
    let mut group = c.benchmark_group("chords");

    group.bench_function("dominant_seventh", |b| {
        b.iter(|| black_box(Chord::dominant_seventh(Note::new(black_box(PitchClass::G), 3)).ok()))
    });

    group.bench_function("all_triads", |b| {
        b.iter(|| {
            black_box(builder::all_major_triads(4).ok());
            black_box(builder::all_minor_triads(4).ok());
        })
    });

    group.bench_function("chord_symbol", |b| {
        b.iter(|| black_box(builder::chord_from_key_name(black_box("Bbmaj7"), 3).ok()))
    });

    for mode in [KeyMode::Major, KeyMode::Minor] {
        group.bench_with_input(
            BenchmarkId::new("diatonic_chords", mode.name()),
            &mode,
            |b, &mode| {
                b.iter(|| {
                    for f in 0..12 {
                        if let Ok(key) = Key::from_circle_of_fifths(f, mode) {
                            black_box(key.diatonic_chords_info().ok());
                        }
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_patterns(c: &mut Criterion) {
    let major = ScalePattern::major();

    c.bench_function("derive_all_modes", |b| {
        b.iter(|| {
            for degree in 1..=7 {
                black_box(major.derive(degree, "Mode", "m").ok());
            }
        })
    });

    c.bench_function("identify_mode", |b| {
        let lydian = ChurchMode::Lydian.pattern();
        b.iter(|| black_box(modes::identify(black_box(lydian))))
    });

    c.bench_function("scale_quantize", |b| {
        let scale = Scale::from_type(PitchClass::D, ScaleType::Dorian);
        b.iter(|| {
            for midi in 48..72u8 {
                black_box(scale.quantize(black_box(midi)));
            }
        })
    });

    c.bench_function("scale_step", |b| {
        let scale = Scale::from_type(PitchClass::A, ScaleType::HarmonicMinor);
        b.iter(|| {
            for degrees in -7..=7 {
                black_box(scale.transpose_in_scale(black_box(64), degrees));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_conversions,
    bench_signatures,
    bench_chords,
    bench_patterns
);
criterion_main!(benches);
