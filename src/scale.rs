//! # Scale Builder
//!
//! Same shape as the chord builder, over scale templates of 5 to 7 notes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;
use crate::note::PitchClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleQuality {
    #[serde(rename = "Major (Ionian)")]
    MajorIonian,
    #[serde(rename = "Natural Minor (Aeolian)")]
    NaturalMinorAeolian,
    #[serde(rename = "Pentatonic Major")]
    PentatonicMajor,
    #[serde(rename = "Pentatonic Minor")]
    PentatonicMinor,
    Blues,
    Dorian,
    Mixolydian,
}

impl ScaleQuality {
    pub const ALL: [ScaleQuality; 7] = [
        ScaleQuality::MajorIonian,
        ScaleQuality::NaturalMinorAeolian,
        ScaleQuality::PentatonicMajor,
        ScaleQuality::PentatonicMinor,
        ScaleQuality::Blues,
        ScaleQuality::Dorian,
        ScaleQuality::Mixolydian,
    ];

    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleQuality::MajorIonian => &[0, 2, 4, 5, 7, 9, 11],
            ScaleQuality::NaturalMinorAeolian => &[0, 2, 3, 5, 7, 8, 10],
            ScaleQuality::PentatonicMajor => &[0, 2, 4, 7, 9],
            ScaleQuality::PentatonicMinor => &[0, 3, 5, 7, 10],
            ScaleQuality::Blues => &[0, 3, 5, 6, 7, 10],
            ScaleQuality::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleQuality::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleQuality::MajorIonian => "Major (Ionian)",
            ScaleQuality::NaturalMinorAeolian => "Natural Minor (Aeolian)",
            ScaleQuality::PentatonicMajor => "Pentatonic Major",
            ScaleQuality::PentatonicMinor => "Pentatonic Minor",
            ScaleQuality::Blues => "Blues",
            ScaleQuality::Dorian => "Dorian",
            ScaleQuality::Mixolydian => "Mixolydian",
        }
    }
}

impl fmt::Display for ScaleQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ScaleQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "majorionian" | "major" | "ionian" => Ok(ScaleQuality::MajorIonian),
            "naturalminoraeolian" | "naturalminor" | "minor" | "aeolian" => {
                Ok(ScaleQuality::NaturalMinorAeolian)
            }
            "pentatonicmajor" | "majorpentatonic" => Ok(ScaleQuality::PentatonicMajor),
            "pentatonicminor" | "minorpentatonic" => Ok(ScaleQuality::PentatonicMinor),
            "blues" => Ok(ScaleQuality::Blues),
            "dorian" => Ok(ScaleQuality::Dorian),
            "mixolydian" => Ok(ScaleQuality::Mixolydian),
            _ => Err(TheoryError::UnknownScaleQuality(s.to_string())),
        }
    }
}

/// Build the notes of a scale, starting on `root`.
pub fn build_scale(root: PitchClass, quality: ScaleQuality) -> Vec<PitchClass> {
    quality
        .intervals()
        .iter()
        .map(|&offset| root.transpose(offset as i32))
        .collect()
}

/// Name-based scale lookup. Unknown names yield an empty vector.
pub fn scale_tones(root: &str, quality: &str) -> Vec<PitchClass> {
    match (root.parse::<PitchClass>(), quality.parse::<ScaleQuality>()) {
        (Ok(root), Ok(quality)) => build_scale(root, quality),
        (root, quality) => {
            tracing::debug!(?root, ?quality, "scale lookup miss");
            Vec::new()
        }
    }
}
