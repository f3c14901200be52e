// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale patterns: interval shapes independent of any root.
//!
//! A pattern is an ascending list of intervals measured from the root,
//! starting at unison and staying inside one octave. Modes are produced by
//! rotating an existing pattern so it starts on another degree.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::interval::{Interval, Semitones};
use crate::error::{Result, TheoryError};

/// Broad quality of a pattern, read from its third and fifth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternQuality {
    Major,
    Minor,
    Diminished,
    Other,
}

impl PatternQuality {
    fn infer(intervals: &[Interval]) -> Self {
        let has = |i: Interval| intervals.contains(&i);
        if has(Interval::MAJOR_THIRD) && has(Interval::PERFECT_FIFTH) {
            PatternQuality::Major
        } else if has(Interval::MINOR_THIRD) && has(Interval::PERFECT_FIFTH) {
            PatternQuality::Minor
        } else if has(Interval::MINOR_THIRD) && has(Interval::TRITONE) {
            PatternQuality::Diminished
        } else {
            PatternQuality::Other
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternQuality::Major => "major",
            PatternQuality::Minor => "minor",
            PatternQuality::Diminished => "diminished",
            PatternQuality::Other => "other",
        }
    }
}

impl fmt::Display for PatternQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An ordered interval shape defining a scale or mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ScalePatternRepr", into = "ScalePatternRepr")]
pub struct ScalePattern {
    name: String,
    symbol: String,
    intervals: Vec<Interval>,
    quality: PatternQuality,
    derived_from_degree: Option<usize>,
}

impl ScalePattern {
    /// Create a validated pattern
    ///
    /// The list must start at unison, be strictly ascending, and stay below
    /// the octave.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        intervals: Vec<Interval>,
    ) -> Result<Self> {
        let name = name.into();
        validate(&name, &intervals)?;
        Ok(Self::build(name, symbol.into(), intervals, None))
    }

    /// Create a validated pattern from raw semitone values
    pub fn from_semitones(
        name: impl Into<String>,
        symbol: impl Into<String>,
        semitones: &[Semitones],
    ) -> Result<Self> {
        Self::new(
            name,
            symbol,
            semitones.iter().copied().map(Interval::new).collect(),
        )
    }

    fn build(
        name: String,
        symbol: String,
        intervals: Vec<Interval>,
        derived_from_degree: Option<usize>,
    ) -> Self {
        let quality = PatternQuality::infer(&intervals);
        Self {
            name,
            symbol,
            intervals,
            quality,
            derived_from_degree,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn quality(&self) -> PatternQuality {
        self.quality
    }

    /// Degree of the parent pattern this one was rotated from (1-based)
    pub fn derived_from_degree(&self) -> Option<usize> {
        self.derived_from_degree
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Intervals as plain semitone counts
    pub fn semitone_pattern(&self) -> Vec<Semitones> {
        self.intervals.iter().map(|i| i.semitones()).collect()
    }

    /// Step sizes between consecutive degrees, closing back to the octave
    pub fn step_pattern(&self) -> Vec<Semitones> {
        let mut steps: Vec<Semitones> = self
            .intervals
            .windows(2)
            .map(|w| (w[1] - w[0]).semitones())
            .collect();
        if let Some(last) = self.intervals.last() {
            steps.push(12 - last.semitones());
        }
        steps
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Interval above the root for a 1-based degree
    pub fn interval_at_degree(&self, degree: usize) -> Result<Interval> {
        if degree == 0 || degree > self.len() {
            return Err(TheoryError::degree(degree, self.len()));
        }
        Ok(self.intervals[degree - 1])
    }

    pub fn contains_interval(&self, interval: Interval) -> bool {
        self.intervals.contains(&interval.simple())
    }

    /// Rotate so the pattern starts on `start_degree` (1-based)
    ///
    /// Every interval is re-measured from the new starting point, wrapping
    /// into the octave, and the result records which degree it came from.
    pub fn derive(
        &self,
        start_degree: usize,
        new_name: impl Into<String>,
        new_symbol: impl Into<String>,
    ) -> Result<ScalePattern> {
        if start_degree == 0 || start_degree > self.len() {
            return Err(TheoryError::degree(start_degree, self.len()));
        }
        let derived = self.rotated(start_degree, new_name.into(), new_symbol.into());
        trace!(
            parent = %self.name,
            degree = start_degree,
            derived = %derived.name,
            "derived pattern"
        );
        Ok(derived)
    }

    /// Rotation with an already checked degree
    pub(crate) fn rotated(&self, start_degree: usize, name: String, symbol: String) -> ScalePattern {
        let offset = self.intervals[start_degree - 1];
        let len = self.len();
        let intervals = (0..len)
            .map(|i| (self.intervals[(start_degree - 1 + i) % len] - offset).simple())
            .collect();
        Self::build(name, symbol, intervals, Some(start_degree))
    }

    /// True if both patterns have exactly the same intervals, whatever their names
    pub fn same_shape(&self, other: &ScalePattern) -> bool {
        self.intervals == other.intervals
    }

    /// Same shape under a new name
    pub fn renamed(&self, name: impl Into<String>, symbol: impl Into<String>) -> ScalePattern {
        Self::build(
            name.into(),
            symbol.into(),
            self.intervals.clone(),
            self.derived_from_degree,
        )
    }

    pub fn major() -> ScalePattern {
        ScaleType::Major.pattern().clone()
    }

    pub fn natural_minor() -> ScalePattern {
        ScaleType::NaturalMinor.pattern().clone()
    }

    /// Serialize to the JSON wire form
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| TheoryError::StructuralInvariantViolation(e.to_string()))
    }

    /// Parse from the JSON wire form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TheoryError::pattern("<json>", e.to_string()))
    }
}

/// Patterns compare by name and intervals; derivation history is not identity
impl PartialEq for ScalePattern {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.intervals == other.intervals
    }
}

impl Eq for ScalePattern {}

impl fmt::Display for ScalePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate(name: &str, intervals: &[Interval]) -> Result<()> {
    let first = intervals
        .first()
        .ok_or_else(|| TheoryError::pattern(name, "interval list is empty"))?;
    if *first != Interval::UNISON {
        return Err(TheoryError::pattern(name, "first interval must be unison"));
    }
    if intervals.windows(2).any(|w| w[1] <= w[0]) {
        return Err(TheoryError::pattern(
            name,
            "intervals must be strictly ascending",
        ));
    }
    if intervals.iter().any(|i| i.semitones() >= 12) {
        return Err(TheoryError::pattern(
            name,
            "intervals must stay within one octave",
        ));
    }
    Ok(())
}

/// Wire form: `{ name, type, intervals }` plus optional symbol and derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScalePatternRepr {
    name: String,
    #[serde(rename = "type", default = "default_quality")]
    quality: PatternQuality,
    intervals: Vec<Semitones>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    derived_from_degree: Option<usize>,
}

fn default_quality() -> PatternQuality {
    PatternQuality::Other
}

impl From<ScalePattern> for ScalePatternRepr {
    fn from(pattern: ScalePattern) -> Self {
        ScalePatternRepr {
            intervals: pattern.semitone_pattern(),
            name: pattern.name,
            quality: pattern.quality,
            symbol: pattern.symbol,
            derived_from_degree: pattern.derived_from_degree,
        }
    }
}

impl TryFrom<ScalePatternRepr> for ScalePattern {
    type Error = TheoryError;

    fn try_from(repr: ScalePatternRepr) -> Result<Self> {
        let intervals: Vec<Interval> = repr.intervals.into_iter().map(Interval::new).collect();
        validate(&repr.name, &intervals)?;
        if let Some(degree) = repr.derived_from_degree {
            if degree == 0 || degree > intervals.len() {
                return Err(TheoryError::degree(degree, intervals.len()));
            }
        }
        // The stored type is informational; quality is always re-inferred.
        Ok(Self::build(
            repr.name,
            repr.symbol,
            intervals,
            repr.derived_from_degree,
        ))
    }
}

/// Built-in scale types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    // Major scale and modes
    Major,        // Ionian
    Dorian,       // Minor with raised 6th
    Phrygian,     // Minor with lowered 2nd
    Lydian,       // Major with raised 4th
    Mixolydian,   // Major with lowered 7th
    NaturalMinor, // Aeolian
    Locrian,      // Diminished

    // Other minor scales
    HarmonicMinor,
    MelodicMinor, // Ascending form

    // Pentatonic scales
    MajorPentatonic,
    MinorPentatonic,

    // Blues
    Blues,
    MajorBlues,

    // Other common scales
    WholeTone,
    Diminished,   // Half-whole
    DiminishedWH, // Whole-half
    Chromatic,
}

static PATTERNS: Lazy<Vec<ScalePattern>> = Lazy::new(|| {
    let major = ScalePattern::build(
        "Major".to_string(),
        String::new(),
        semis(&[0, 2, 4, 5, 7, 9, 11]),
        None,
    );
    let patterns: Vec<ScalePattern> = ScaleType::ALL
        .iter()
        .map(|&st| match st.major_mode_degree() {
            Some(1) => major.clone(),
            Some(degree) => major.rotated(degree, st.name().to_string(), st.symbol().to_string()),
            None => ScalePattern::build(
                st.name().to_string(),
                st.symbol().to_string(),
                semis(st.fixed_intervals()),
                None,
            ),
        })
        .collect();
    debug!(count = patterns.len(), "built scale pattern table");
    patterns
});

fn semis(values: &[Semitones]) -> Vec<Interval> {
    values.iter().copied().map(Interval::new).collect()
}

impl ScaleType {
    /// All built-in scale types
    pub const ALL: [ScaleType; 17] = [
        ScaleType::Major,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::NaturalMinor,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
        ScaleType::MajorBlues,
        ScaleType::WholeTone,
        ScaleType::Diminished,
        ScaleType::DiminishedWH,
        ScaleType::Chromatic,
    ];

    /// Degree of the major scale this mode starts on
    pub fn major_mode_degree(self) -> Option<usize> {
        match self {
            ScaleType::Major => Some(1),
            ScaleType::Dorian => Some(2),
            ScaleType::Phrygian => Some(3),
            ScaleType::Lydian => Some(4),
            ScaleType::Mixolydian => Some(5),
            ScaleType::NaturalMinor => Some(6),
            ScaleType::Locrian => Some(7),
            _ => None,
        }
    }

    /// Intervals for types that are not rotations of the major scale
    fn fixed_intervals(self) -> &'static [Semitones] {
        match self {
            ScaleType::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleType::MajorPentatonic => &[0, 2, 4, 7, 9],
            ScaleType::MinorPentatonic => &[0, 3, 5, 7, 10],
            ScaleType::Blues => &[0, 3, 5, 6, 7, 10],
            ScaleType::MajorBlues => &[0, 2, 3, 4, 7, 9],
            ScaleType::WholeTone => &[0, 2, 4, 6, 8, 10],
            ScaleType::Diminished => &[0, 1, 3, 4, 6, 7, 9, 10],
            ScaleType::DiminishedWH => &[0, 2, 3, 5, 6, 8, 9, 11],
            ScaleType::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            // Modes are derived, never read from here
            _ => &[0],
        }
    }

    /// The shared pattern for this type
    pub fn pattern(self) -> &'static ScalePattern {
        &PATTERNS[self as usize]
    }

    /// Parse scale type from string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" | "maj" => Some(ScaleType::Major),
            "dorian" => Some(ScaleType::Dorian),
            "phrygian" => Some(ScaleType::Phrygian),
            "lydian" => Some(ScaleType::Lydian),
            "mixolydian" => Some(ScaleType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" | "min" => Some(ScaleType::NaturalMinor),
            "locrian" => Some(ScaleType::Locrian),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            "majorpentatonic" | "pentatonicmajor" => Some(ScaleType::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Some(ScaleType::MinorPentatonic),
            "blues" | "minorblues" => Some(ScaleType::Blues),
            "majorblues" => Some(ScaleType::MajorBlues),
            "wholetone" => Some(ScaleType::WholeTone),
            "diminished" | "octatonic" | "halfwhole" => Some(ScaleType::Diminished),
            "diminishedwh" | "wholehalf" => Some(ScaleType::DiminishedWH),
            "chromatic" => Some(ScaleType::Chromatic),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::MinorPentatonic => "Minor Pentatonic",
            ScaleType::Blues => "Blues",
            ScaleType::MajorBlues => "Major Blues",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::Diminished => "Diminished",
            ScaleType::DiminishedWH => "Diminished (W-H)",
            ScaleType::Chromatic => "Chromatic",
        }
    }

    /// Short symbol appended to a root name
    pub fn symbol(self) -> &'static str {
        match self {
            ScaleType::Major => "",
            ScaleType::Dorian => "dor",
            ScaleType::Phrygian => "phr",
            ScaleType::Lydian => "lyd",
            ScaleType::Mixolydian => "mix",
            ScaleType::NaturalMinor => "m",
            ScaleType::Locrian => "loc",
            ScaleType::HarmonicMinor => "harm",
            ScaleType::MelodicMinor => "mel",
            ScaleType::MajorPentatonic => "pent",
            ScaleType::MinorPentatonic => "m pent",
            ScaleType::Blues => "blues",
            ScaleType::MajorBlues => "maj blues",
            ScaleType::WholeTone => "wt",
            ScaleType::Diminished => "dim",
            ScaleType::DiminishedWH => "dim wh",
            ScaleType::Chromatic => "chr",
        }
    }

    /// Get the parallel minor/major scale type
    pub fn parallel(self) -> Option<Self> {
        match self {
            ScaleType::Major => Some(ScaleType::NaturalMinor),
            ScaleType::NaturalMinor => Some(ScaleType::Major),
            ScaleType::MajorPentatonic => Some(ScaleType::MinorPentatonic),
            ScaleType::MinorPentatonic => Some(ScaleType::MajorPentatonic),
            _ => None,
        }
    }

    /// The built-in type whose pattern has exactly these intervals
    pub fn identify(pattern: &ScalePattern) -> Option<Self> {
        ScaleType::ALL
            .iter()
            .copied()
            .find(|st| st.pattern().same_shape(pattern))
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Custom scale definitions that can be loaded from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomScaleDefinition {
    /// Name of the scale
    pub name: String,
    /// Optional short symbol
    #[serde(default)]
    pub symbol: String,
    /// Intervals from root (semitones)
    pub intervals: Vec<Semitones>,
}

impl CustomScaleDefinition {
    /// Validate this definition into a pattern
    pub fn to_pattern(&self) -> Result<ScalePattern> {
        ScalePattern::from_semitones(&self.name, &self.symbol, &self.intervals)
    }
}

/// Registry for custom scale patterns layered over the built-in ones
#[derive(Debug, Clone, Default)]
pub struct ScaleRegistry {
    custom_scales: HashMap<String, ScalePattern>,
}

impl ScaleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions, skipping any that fail validation
    pub fn from_definitions(defs: &[CustomScaleDefinition]) -> Self {
        let mut registry = Self::new();
        for def in defs {
            if let Err(e) = registry.register(def) {
                warn!(scale = %def.name, error = %e, "skipping custom scale");
            }
        }
        registry
    }

    /// Register a custom scale
    pub fn register(&mut self, def: &CustomScaleDefinition) -> Result<()> {
        let pattern = def.to_pattern()?;
        self.custom_scales.insert(normalize(&def.name), pattern);
        Ok(())
    }

    /// Get a pattern by name (checks custom first, then built-in)
    pub fn get(&self, name: &str) -> Option<ScalePattern> {
        if let Some(pattern) = self.custom_scales.get(&normalize(name)) {
            return Some(pattern.clone());
        }
        ScaleType::parse(name).map(|st| st.pattern().clone())
    }

    /// List all available scale names
    pub fn available_scales(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .custom_scales
            .values()
            .map(|p| p.name().to_string())
            .collect();
        names.extend(ScaleType::ALL.iter().map(|st| st.name().to_string()));
        names.sort();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.custom_scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.custom_scales.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-', '_'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_semitones() {
        assert_eq!(
            ScalePattern::major().semitone_pattern(),
            vec![0, 2, 4, 5, 7, 9, 11]
        );
        assert_eq!(ScalePattern::major().step_pattern(), vec![2, 2, 1, 2, 2, 2, 1]);
    }

    #[test]
    fn test_derive_dorian() {
        let dorian = ScalePattern::major().derive(2, "Dorian", "dor").unwrap();
        assert_eq!(dorian.semitone_pattern(), vec![0, 2, 3, 5, 7, 9, 10]);
        assert_eq!(dorian.derived_from_degree(), Some(2));
        assert_eq!(dorian.quality(), PatternQuality::Minor);
        assert!(dorian.same_shape(ScaleType::Dorian.pattern()));
    }

    #[test]
    fn test_derived_modes_table() {
        assert_eq!(
            ScaleType::NaturalMinor.pattern().semitone_pattern(),
            vec![0, 2, 3, 5, 7, 8, 10]
        );
        assert_eq!(
            ScaleType::Lydian.pattern().semitone_pattern(),
            vec![0, 2, 4, 6, 7, 9, 11]
        );
        assert_eq!(
            ScaleType::Locrian.pattern().semitone_pattern(),
            vec![0, 1, 3, 5, 6, 8, 10]
        );
        assert_eq!(ScaleType::Locrian.pattern().derived_from_degree(), Some(7));
        assert_eq!(ScaleType::Major.pattern().derived_from_degree(), None);
    }

    #[test]
    fn test_derive_rejects_bad_degree() {
        let major = ScalePattern::major();
        assert!(matches!(
            major.derive(0, "x", "x"),
            Err(TheoryError::InvalidIndex { .. })
        ));
        assert!(major.derive(8, "x", "x").is_err());
    }

    #[test]
    fn test_quality_inference() {
        assert_eq!(ScaleType::Major.pattern().quality(), PatternQuality::Major);
        assert_eq!(ScaleType::NaturalMinor.pattern().quality(), PatternQuality::Minor);
        assert_eq!(ScaleType::Locrian.pattern().quality(), PatternQuality::Diminished);
        assert_eq!(ScaleType::WholeTone.pattern().quality(), PatternQuality::Other);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            ScalePattern::from_semitones("Empty", "", &[]),
            Err(TheoryError::InvalidPattern { .. })
        ));
        assert!(ScalePattern::from_semitones("Unsorted", "", &[0, 4, 2]).is_err());
        assert!(ScalePattern::from_semitones("Repeated", "", &[0, 2, 2]).is_err());
        assert!(ScalePattern::from_semitones("Octave", "", &[0, 4, 12]).is_err());
        assert!(ScalePattern::from_semitones("NoRoot", "", &[2, 4, 7]).is_err());
        assert!(ScalePattern::from_semitones("Triad", "", &[0, 4, 7]).is_ok());
    }

    #[test]
    fn test_interval_at_degree() {
        let major = ScalePattern::major();
        assert_eq!(major.interval_at_degree(5).unwrap(), Interval::PERFECT_FIFTH);
        assert!(major.interval_at_degree(0).is_err());
        assert!(major.interval_at_degree(8).is_err());
    }

    #[test]
    fn test_scale_type_parse() {
        assert_eq!(ScaleType::parse("major"), Some(ScaleType::Major));
        assert_eq!(ScaleType::parse("Minor"), Some(ScaleType::NaturalMinor));
        assert_eq!(ScaleType::parse("dorian"), Some(ScaleType::Dorian));
        assert_eq!(ScaleType::parse("harmonic_minor"), Some(ScaleType::HarmonicMinor));
        assert_eq!(ScaleType::parse("unknown"), None);
    }

    #[test]
    fn test_identify() {
        let aeolian = ScalePattern::major().derive(6, "Aeolian", "aeo").unwrap();
        assert_eq!(ScaleType::identify(&aeolian), Some(ScaleType::NaturalMinor));
        let odd = ScalePattern::from_semitones("Odd", "", &[0, 1, 2]).unwrap();
        assert_eq!(ScaleType::identify(&odd), None);
    }

    #[test]
    fn test_json_round_trip() {
        let dorian = ScaleType::Dorian.pattern().clone();
        let json = dorian.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Dorian");
        assert_eq!(value["type"], "minor");
        assert_eq!(value["intervals"], serde_json::json!([0, 2, 3, 5, 7, 9, 10]));
        assert_eq!(value["derivedFromDegree"], 2);

        let parsed = ScalePattern::from_json(&json).unwrap();
        assert_eq!(parsed, dorian);
        assert_eq!(parsed.derived_from_degree(), Some(2));
    }

    #[test]
    fn test_json_rejects_invalid_intervals() {
        let json = r#"{ "name": "Bad", "type": "major", "intervals": [0, 7, 4] }"#;
        assert!(ScalePattern::from_json(json).is_err());
    }

    #[test]
    fn test_scale_registry() {
        let mut registry = ScaleRegistry::new();

        registry
            .register(&CustomScaleDefinition {
                name: "Super Locrian".to_string(),
                symbol: "alt".to_string(),
                intervals: vec![0, 1, 3, 4, 6, 8, 10],
            })
            .unwrap();

        let custom = registry.get("super_locrian").unwrap();
        assert_eq!(custom.len(), 7);
        assert_eq!(custom.symbol(), "alt");

        assert!(registry.get("major").is_some());
        assert!(registry.get("nope").is_none());
        assert!(registry.available_scales().contains(&"Super Locrian".to_string()));
    }

    #[test]
    fn test_registry_skips_invalid() {
        let registry = ScaleRegistry::from_definitions(&[
            CustomScaleDefinition {
                name: "Good".to_string(),
                symbol: String::new(),
                intervals: vec![0, 3, 7],
            },
            CustomScaleDefinition {
                name: "Bad".to_string(),
                symbol: String::new(),
                intervals: vec![0, 13],
            },
        ]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("good").is_some());
        assert!(registry.get("bad").is_none());
    }
}
