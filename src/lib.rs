// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Circle-of-fifths music theory engine.
//!
//! Models the twelve pitch classes and their two orderings (chromatic and
//! circle of fifths), key signatures, scale patterns and their modal
//! derivations, keys with diatonic harmony, and chords with their tones.
//! All values are immutable; shared tables are built once and read-only.

pub mod config;
pub mod error;
pub mod music;

pub use error::{Result, TheoryError};
