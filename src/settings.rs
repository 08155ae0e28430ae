//! # Settings
//!
//! Last-used selections loaded from a YAML file.
//!
//! The file is read into [`RawSettings`] (all fields optional, kebab-case) and
//! then validated field by field into [`Settings`]. Missing fields take their
//! defaults; invalid values are reported with the field name.
//!
//! ```rust
//! use tonehouse::settings::Settings;
//! use tonehouse::progression::Style;
//! use tonehouse::{PitchClass, Tonality};
//!
//! let settings = Settings::from_yaml("root: Eb\ntonality: minor\nstyle: jazz\n")?;
//! assert_eq!(settings.root, PitchClass::DSharp);
//! assert_eq!(settings.tonality, Tonality::Minor);
//! assert_eq!(settings.style, Style::Jazz);
//! # Ok::<(), tonehouse::TheoryError>(())
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ear_training::Difficulty;
use crate::error::TheoryError;
use crate::harmony::Tonality;
use crate::metronome::{clamp_bpm, MAX_BEATS_PER_BAR, MIN_BEATS_PER_BAR};
use crate::note::PitchClass;
use crate::progression::{Length, Style};
use crate::voicing::Instrument;

const DEFAULT_BPM: u16 = 80;
const DEFAULT_BEATS_PER_BAR: u8 = 4;

/// Settings file contents before validation.
#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tonality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beats_per_bar: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub root: PitchClass,
    pub tonality: Tonality,
    pub style: Style,
    pub length: Length,
    pub instrument: Instrument,
    pub difficulty: Difficulty,
    pub bpm: u16,
    pub beats_per_bar: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            root: PitchClass::C,
            tonality: Tonality::Major,
            style: Style::Pop,
            length: Length::Four,
            instrument: Instrument::Guitar,
            difficulty: Difficulty::Beginner,
            bpm: DEFAULT_BPM,
            beats_per_bar: DEFAULT_BEATS_PER_BAR,
        }
    }
}

/// Parse an optional field, naming it in the error.
fn parse_field<T>(field: &str, value: Option<&String>, default: T) -> Result<T, TheoryError>
where
    T: FromStr<Err = TheoryError>,
{
    match value {
        Some(text) => text
            .parse()
            .map_err(|e: TheoryError| TheoryError::SettingsError(format!("{}: {}", field, e))),
        None => Ok(default),
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Settings, TheoryError> {
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        let raw: RawSettings = serde_yaml::from_str(content)
            .map_err(|e| TheoryError::SettingsError(e.to_string()))?;
        Settings::from_raw(raw)
    }

    pub fn from_raw(raw: RawSettings) -> Result<Settings, TheoryError> {
        let defaults = Settings::default();

        let length = match raw.length {
            Some(bars) => Length::try_from(bars)
                .map_err(|e| TheoryError::SettingsError(format!("length: {}", e)))?,
            None => defaults.length,
        };

        let beats_per_bar = match raw.beats_per_bar {
            Some(beats) if (MIN_BEATS_PER_BAR..=MAX_BEATS_PER_BAR).contains(&beats) => beats,
            Some(beats) => {
                return Err(TheoryError::SettingsError(format!(
                    "beats-per-bar: {} is outside {}-{}",
                    beats, MIN_BEATS_PER_BAR, MAX_BEATS_PER_BAR
                )))
            }
            None => defaults.beats_per_bar,
        };

        Ok(Settings {
            root: parse_field("root", raw.root.as_ref(), defaults.root)?,
            tonality: parse_field("tonality", raw.tonality.as_ref(), defaults.tonality)?,
            style: parse_field("style", raw.style.as_ref(), defaults.style)?,
            length,
            instrument: parse_field("instrument", raw.instrument.as_ref(), defaults.instrument)?,
            difficulty: parse_field("difficulty", raw.difficulty.as_ref(), defaults.difficulty)?,
            bpm: raw.bpm.map(clamp_bpm).unwrap_or(defaults.bpm),
            beats_per_bar,
        })
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Settings, TheoryError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TheoryError::SettingsError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let settings = Settings::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn to_raw(&self) -> RawSettings {
        RawSettings {
            root: Some(self.root.to_string()),
            tonality: Some(self.tonality.to_string().to_lowercase()),
            style: Some(self.style.to_string().to_lowercase()),
            length: Some(self.length.bars() as u8),
            instrument: Some(
                match self.instrument {
                    Instrument::Guitar => "guitar",
                    Instrument::Bass => "bass",
                    Instrument::Keys => "keys",
                }
                .to_string(),
            ),
            difficulty: Some(self.difficulty.to_string().to_lowercase()),
            bpm: Some(self.bpm),
            beats_per_bar: Some(self.beats_per_bar),
        }
    }

    pub fn to_yaml(&self) -> Result<String, TheoryError> {
        serde_yaml::to_string(&self.to_raw()).map_err(|e| TheoryError::SettingsError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        assert_eq!(Settings::from_yaml("root: C\n").unwrap(), Settings::default());
    }

    #[test]
    fn test_full_file() {
        let yaml = r#"
root: F#
tonality: minor
style: ballad
length: 8
instrument: keyboards
difficulty: intermediate
bpm: 96
beats-per-bar: 3
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.root, PitchClass::FSharp);
        assert_eq!(settings.tonality, Tonality::Minor);
        assert_eq!(settings.style, Style::Ballad);
        assert_eq!(settings.length, Length::Eight);
        assert_eq!(settings.instrument, Instrument::Keys);
        assert_eq!(settings.difficulty, Difficulty::Intermediate);
        assert_eq!(settings.bpm, 96);
        assert_eq!(settings.beats_per_bar, 3);
    }

    #[test]
    fn test_invalid_values_name_the_field() {
        let err = Settings::from_yaml("style: polka\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid settings: style: Unknown progression style: polka"
        );

        let err = Settings::from_yaml("length: 6\n").unwrap_err();
        assert!(err.to_string().contains("length"));

        let err = Settings::from_yaml("beats-per-bar: 9\n").unwrap_err();
        assert!(err.to_string().contains("beats-per-bar"));

        assert!(Settings::from_yaml("colour: blue\n").is_err());
    }

    #[test]
    fn test_bpm_is_clamped() {
        assert_eq!(Settings::from_yaml("bpm: 400\n").unwrap().bpm, 220);
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = Settings {
            root: PitchClass::ASharp,
            tonality: Tonality::Minor,
            style: Style::Jazz,
            length: Length::Eight,
            instrument: Instrument::Bass,
            difficulty: Difficulty::Intermediate,
            bpm: 150,
            beats_per_bar: 5,
        };
        let yaml = settings.to_yaml().unwrap();
        assert!(yaml.contains("A#"));
        assert!(yaml.contains("beats-per-bar: 5"));
        assert_eq!(Settings::from_yaml(&yaml).unwrap(), settings);
    }
}
