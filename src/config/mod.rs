// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the theory engine and its command line front end.
//!
//! Settings load from YAML or TOML, chosen by file extension. Every field
//! has a default so partial files are accepted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::convert::to_unicode_accidentals;
use crate::music::key::Key;
use crate::music::pattern::{CustomScaleDefinition, ScaleRegistry};

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TheoryConfig {
    /// Octave for chord roots when none is given
    #[serde(default = "default_octave")]
    pub default_octave: i8,
    /// Key used when a command needs one and none is given
    #[serde(default = "default_key")]
    pub default_key: String,
    /// Render names with ♯ and ♭ instead of # and b
    #[serde(default)]
    pub unicode_accidentals: bool,
    /// Log level for the binary (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Seed for random progressions; unset means a fresh seed each run
    #[serde(default)]
    pub progression_seed: Option<u64>,
    /// Custom scales layered over the built-in catalogue
    #[serde(default)]
    pub scales: Vec<CustomScaleDefinition>,
}

fn default_octave() -> i8 {
    4
}
fn default_key() -> String {
    "C".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            default_octave: default_octave(),
            default_key: default_key(),
            unicode_accidentals: false,
            log_level: default_log_level(),
            progression_seed: None,
            scales: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

impl TheoryConfig {
    /// Load from a `.yaml`/`.yml` or `.toml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        match Format::for_path(path) {
            Format::Yaml => Self::from_yaml(&contents),
            Format::Toml => Self::from_toml(&contents),
        }
        .with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save in the format matching the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = match Format::for_path(path) {
            Format::Yaml => self.to_yaml()?,
            Format::Toml => self.to_toml()?,
        };
        fs::write(path, text).with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Built-in scales plus the valid custom ones; invalid entries are logged and skipped
    pub fn scale_registry(&self) -> ScaleRegistry {
        ScaleRegistry::from_definitions(&self.scales)
    }

    pub fn key(&self) -> Result<Key> {
        Key::parse(&self.default_key)
            .with_context(|| format!("Invalid default key: {}", self.default_key))
    }

    pub fn tracing_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid log level: {}", self.log_level))
    }

    /// Apply the accidental rendering preference to a name
    pub fn display(&self, name: &str) -> String {
        if self.unicode_accidentals {
            to_unicode_accidentals(name)
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::pitch::PitchClass;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = TheoryConfig::from_yaml("{}").unwrap();
        assert_eq!(config, TheoryConfig::default());
        assert_eq!(config.default_octave, 4);
        assert_eq!(config.key().unwrap(), Key::major(PitchClass::C));
        assert_eq!(config.tracing_level().unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
default_octave: 3
default_key: "Bb"
unicode_accidentals: true
progression_seed: 7
scales:
  - name: "Hirajoshi"
    symbol: "hira"
    intervals: [0, 2, 3, 7, 8]
  - name: "Broken"
    intervals: [0, 4, 2]
"#;
        let config = TheoryConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.default_octave, 3);
        assert_eq!(config.progression_seed, Some(7));
        assert_eq!(config.display("Bb"), "B♭");
        assert_eq!(config.key().unwrap().fifths_index(), 10);

        let registry = config.scale_registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("hirajoshi").is_some());
        assert!(registry.get("broken").is_none());
        assert!(registry.get("dorian").is_some());
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
default_key = "F#m"
log_level = "debug"

[[scales]]
name = "Prometheus"
intervals = [0, 2, 4, 6, 9, 10]
"#;
        let config = TheoryConfig::from_toml(text).unwrap();
        assert_eq!(config.key().unwrap().short_name(), "F#m");
        assert_eq!(config.tracing_level().unwrap(), tracing::Level::DEBUG);
        assert_eq!(config.scales.len(), 1);
    }

    #[test]
    fn test_invalid_values() {
        let config = TheoryConfig {
            default_key: "H".to_string(),
            log_level: "loud".to_string(),
            ..TheoryConfig::default()
        };
        assert!(config.key().is_err());
        assert!(config.tracing_level().is_err());
        assert!(TheoryConfig::from_yaml("default_octave: [").is_err());
    }

    #[test]
    fn test_round_trip_files() {
        let dir = tempdir().unwrap();
        let config = TheoryConfig {
            default_octave: 2,
            progression_seed: Some(99),
            scales: vec![CustomScaleDefinition {
                name: "Tritone".to_string(),
                symbol: String::new(),
                intervals: vec![0, 1, 4, 6, 7, 10],
            }],
            ..TheoryConfig::default()
        };

        for file in ["theory.yaml", "theory.toml"] {
            let path = dir.path().join(file);
            config.save(&path).unwrap();
            let loaded = TheoryConfig::load(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(TheoryConfig::load(dir.path().join("absent.yaml")).is_err());
    }
}
