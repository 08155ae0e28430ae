//! Progression type definitions
//!
//! Template bucket keys ([`Style`], [`Length`]) and the resolved output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;

/// Musical style a progression template is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Pop,
    Rock,
    Blues,
    Jazz,
    Ballad,
}

impl Style {
    pub const ALL: [Style; 5] = [Style::Pop, Style::Rock, Style::Blues, Style::Jazz, Style::Ballad];
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Pop => "Pop",
            Style::Rock => "Rock",
            Style::Blues => "Blues",
            Style::Jazz => "Jazz",
            Style::Ballad => "Ballad",
        };
        f.pad(name)
    }
}

impl FromStr for Style {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pop" => Ok(Style::Pop),
            "rock" => Ok(Style::Rock),
            "blues" => Ok(Style::Blues),
            "jazz" => Ok(Style::Jazz),
            "ballad" => Ok(Style::Ballad),
            _ => Err(TheoryError::UnknownStyle(s.to_string())),
        }
    }
}

/// Progression length in bars (one chord per bar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Length {
    #[default]
    Four,
    Eight,
}

impl Length {
    pub fn bars(self) -> usize {
        match self {
            Length::Four => 4,
            Length::Eight => 8,
        }
    }
}

impl From<Length> for u8 {
    fn from(length: Length) -> Self {
        length.bars() as u8
    }
}

impl TryFrom<u8> for Length {
    type Error = TheoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Length::Four),
            8 => Ok(Length::Eight),
            other => Err(TheoryError::InvalidLength(other.to_string())),
        }
    }
}

impl FromStr for Length {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4" => Ok(Length::Four),
            "8" => Ok(Length::Eight),
            _ => Err(TheoryError::InvalidLength(s.to_string())),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bars", self.bars())
    }
}

/// A progression resolved against a key.
///
/// `roman_numerals[i]` is the template token that produced `chords[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProgression {
    pub roman_numerals: Vec<String>,
    pub chords: Vec<String>,
}

impl ResolvedProgression {
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}
