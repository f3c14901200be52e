// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory engine.
//!
//! Every failure is a deterministic validation error raised at the call
//! that received the bad input. Nothing here is transient or retryable.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, TheoryError>;

/// Errors raised by theory operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// An index outside its domain (fifths index, scale degree, chromatic index)
    #[error("invalid {what} {value}: expected {min}..={max}")]
    InvalidIndex {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A scale pattern that is empty, not strictly ascending, or spans an octave
    #[error("invalid scale pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    /// A chord quality name with no interval table
    #[error("unsupported chord type '{0}'")]
    UnsupportedChordType(String),

    /// A value whose parts contradict each other
    #[error("structural invariant violated: {0}")]
    StructuralInvariantViolation(String),

    /// A note, key or pattern name that could not be parsed
    #[error("unknown name '{0}'")]
    UnknownNoteName(String),
}

impl TheoryError {
    pub(crate) fn fifths_index(value: i64) -> Self {
        TheoryError::InvalidIndex {
            what: "circle-of-fifths index",
            value,
            min: 0,
            max: 11,
        }
    }

    pub(crate) fn chromatic_index(value: i64) -> Self {
        TheoryError::InvalidIndex {
            what: "chromatic index",
            value,
            min: 0,
            max: 11,
        }
    }

    pub(crate) fn degree(value: usize, len: usize) -> Self {
        TheoryError::InvalidIndex {
            what: "scale degree",
            value: value as i64,
            min: 1,
            max: len as i64,
        }
    }

    pub(crate) fn octave(value: i64) -> Self {
        TheoryError::InvalidIndex {
            what: "octave",
            value,
            min: i8::MIN as i64,
            max: i8::MAX as i64,
        }
    }

    pub(crate) fn pattern(name: &str, reason: impl Into<String>) -> Self {
        TheoryError::InvalidPattern {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_message() {
        let err = TheoryError::fifths_index(12);
        assert_eq!(
            err.to_string(),
            "invalid circle-of-fifths index 12: expected 0..=11"
        );
    }

    #[test]
    fn test_degree_message() {
        let err = TheoryError::degree(0, 7);
        assert_eq!(err.to_string(), "invalid scale degree 0: expected 1..=7");
    }

    #[test]
    fn test_pattern_message() {
        let err = TheoryError::pattern("Broken", "intervals must be strictly ascending");
        assert!(err.to_string().contains("Broken"));
        assert!(err.to_string().contains("ascending"));
    }
}
